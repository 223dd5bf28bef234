//! Shared test helpers for CLI integration tests.

use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use assert_cmd::cargo::cargo_bin_cmd;
use tempfile::TempDir;

/// Isolated test environment.
///
/// Each test gets its own working directory, config home and `bin/` for fake
/// tools, so nothing touches the real package manager.
pub struct TestEnv {
  pub temp: TempDir,
}

impl TestEnv {
  pub fn new() -> Self {
    let temp = TempDir::new().unwrap();
    std::fs::create_dir_all(temp.path().join("bin")).unwrap();
    std::fs::create_dir_all(temp.path().join("xdg")).unwrap();
    Self { temp }
  }

  pub fn path(&self, relative: &str) -> PathBuf {
    self.temp.path().join(relative)
  }

  /// Path where a fake tool named `name` lives (it may not exist yet).
  pub fn bin(&self, name: &str) -> PathBuf {
    self.path("bin").join(name)
  }

  /// Write an executable shell script into `bin/`.
  pub fn tool(&self, name: &str, body: &str) -> PathBuf {
    let path = self.bin(name);
    std::fs::write(&path, format!("#!/bin/sh\n{}\n", body)).unwrap();
    std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
    path
  }

  /// Write `preflight.lua` into the working directory.
  pub fn config(&self, content: &str) -> PathBuf {
    let path = self.path("preflight.lua");
    std::fs::write(&path, content).unwrap();
    path
  }

  /// `preflight` running inside this environment.
  pub fn cmd(&self) -> Command {
    let mut cmd = cargo_bin_cmd!("preflight");
    cmd
      .current_dir(self.temp.path())
      .env_remove("PREFLIGHT_CONFIG")
      .env_remove("RUST_LOG")
      .env("XDG_CONFIG_HOME", self.path("xdg"));
    cmd
  }
}

/// Shell snippet that installs a working fake binary at `bin`.
pub fn installs(bin: &Path) -> String {
  format!(
    "printf '#!/bin/sh\\nexit 0\\n' > {bin} && chmod +x {bin}",
    bin = bin.display()
  )
}

/// Config driving a custom package manager made of shell snippets.
pub fn config_with(refresh: &str, install: &str, bin: &Path, extra: &str) -> String {
  format!(
    r#"
return {{
  manager = {{
    refresh = {{ "/bin/sh", "-c", [[{refresh}]] }},
    install = {{ "/bin/sh", "-c", [[{install}]] }},
  }},
  requirements = {{
    {{ package = "poppler-utils", bin = [[{bin}]], probe = "-v" }},
  }},
  {extra}
}}
"#,
    refresh = refresh,
    install = install,
    bin = bin.display(),
    extra = extra,
  )
}

/// Count occurrences of `marker` in captured output.
pub fn count(output: &[u8], marker: &str) -> usize {
  String::from_utf8_lossy(output).matches(marker).count()
}
