use predicates::prelude::*;

use super::common::{TestEnv, config_with, count, installs};

#[test]
fn installs_and_verifies_tool() {
  let env = TestEnv::new();
  let bin = env.bin("pdftoppm");
  let config = env.config(&config_with("exit 0", &installs(&bin), &bin, ""));

  let output = env.cmd().arg("provision").arg(&config).assert().success().get_output().clone();

  assert_eq!(count(&output.stdout, "✓"), 1);
  assert_eq!(count(&output.stdout, "✗"), 0);
  assert!(bin.exists());
}

#[test]
fn missing_binary_after_install_fails() {
  // The installer claims success but leaves nothing behind.
  let env = TestEnv::new();
  let bin = env.bin("pdftoppm");
  let config = env.config(&config_with("exit 0", "exit 0", &bin, ""));

  let output = env.cmd().arg("provision").arg(&config).assert().code(1).get_output().clone();

  assert_eq!(count(&output.stdout, "✗"), 1);
  assert_eq!(count(&output.stdout, "✓"), 0);
  assert!(String::from_utf8_lossy(&output.stdout).contains("not found"));
}

#[test]
fn install_failure_is_reported() {
  let env = TestEnv::new();
  let bin = env.bin("pdftoppm");
  let config = env.config(&config_with("exit 0", "exit 100", &bin, ""));

  let output = env.cmd().arg("provision").arg(&config).assert().code(1).get_output().clone();

  assert_eq!(count(&output.stdout, "✗"), 1);
  assert!(String::from_utf8_lossy(&output.stdout).contains("failed to install poppler-utils"));
}

#[test]
fn broken_binary_fails_probe() {
  let env = TestEnv::new();
  let bin = env.tool("pdftoppm", "exit 99");
  let config = env.config(&config_with("exit 0", "exit 0", &bin, ""));

  env
    .cmd()
    .arg("provision")
    .arg(&config)
    .assert()
    .code(1)
    .stdout(predicate::str::contains("status 99"));
}

#[test]
fn refresh_failure_is_only_a_warning() {
  let env = TestEnv::new();
  let bin = env.bin("pdftoppm");
  let config = env.config(&config_with("exit 1", &installs(&bin), &bin, ""));

  env
    .cmd()
    .arg("provision")
    .arg(&config)
    .assert()
    .success()
    .stderr(predicate::str::contains("failed to refresh custom package index"));
}

#[test]
fn strict_refresh_failure_is_fatal() {
  let env = TestEnv::new();
  let bin = env.bin("pdftoppm");
  let config = env.config(&config_with("exit 1", &installs(&bin), &bin, "strict_refresh = true,"));

  env
    .cmd()
    .arg("provision")
    .arg(&config)
    .assert()
    .code(1)
    .stdout(predicate::str::contains("failed to refresh custom package index"));

  assert!(!bin.exists());
}

#[test]
fn strict_refresh_flag_overrides_config() {
  let env = TestEnv::new();
  let bin = env.bin("pdftoppm");
  let config = env.config(&config_with("exit 1", &installs(&bin), &bin, ""));

  env
    .cmd()
    .arg("provision")
    .arg(&config)
    .arg("--strict-refresh")
    .assert()
    .code(1);
}

#[test]
fn provisioning_is_idempotent() {
  let env = TestEnv::new();
  let bin = env.bin("pdftoppm");
  let config = env.config(&config_with("exit 0", &installs(&bin), &bin, ""));

  for _ in 0..2 {
    let output = env.cmd().arg("provision").arg(&config).assert().success().get_output().clone();
    assert_eq!(count(&output.stdout, "✓"), 1);
  }
}

#[test]
fn config_is_found_in_working_directory() {
  let env = TestEnv::new();
  let bin = env.bin("pdftoppm");
  env.config(&config_with("exit 0", &installs(&bin), &bin, ""));

  env.cmd().arg("provision").assert().success();
}

#[test]
fn config_env_var_is_honored() {
  let env = TestEnv::new();
  let bin = env.bin("pdftoppm");
  let config = env.config(&config_with("exit 0", &installs(&bin), &bin, ""));
  let elsewhere = TestEnv::new();

  elsewhere
    .cmd()
    .env("PREFLIGHT_CONFIG", &config)
    .arg("provision")
    .assert()
    .success();
}

#[test]
fn missing_config_fails() {
  let env = TestEnv::new();

  env
    .cmd()
    .arg("provision")
    .assert()
    .code(1)
    .stdout(predicate::str::contains("no config file found"));
}

#[test]
fn invalid_config_fails() {
  let env = TestEnv::new();
  let config = env.config("return { requirements = ");

  let output = env.cmd().arg("provision").arg(&config).assert().code(1).get_output().clone();

  assert_eq!(count(&output.stdout, "✗"), 1);
  assert!(String::from_utf8_lossy(&output.stdout).contains("lua error"));
}

#[test]
fn unknown_manager_flag_fails() {
  let env = TestEnv::new();
  let bin = env.tool("pdftoppm", "exit 0");
  let config = env.config(&config_with("exit 0", "exit 0", &bin, ""));

  env
    .cmd()
    .arg("provision")
    .arg(&config)
    .args(["--manager", "zypper"])
    .assert()
    .code(1)
    .stdout(predicate::str::contains("unknown package manager 'zypper'"));
}

#[test]
fn check_does_not_install() {
  let env = TestEnv::new();
  let bin = env.tool("pdftoppm", "exit 0");
  let marker = env.path("installed");
  let config = env.config(&config_with(
    "exit 0",
    &format!("touch {}", marker.display()),
    &bin,
    "",
  ));

  let output = env.cmd().arg("check").arg(&config).assert().success().get_output().clone();

  assert_eq!(count(&output.stdout, "✓"), 1);
  assert!(!marker.exists());
}

#[test]
fn check_fails_for_missing_tool() {
  let env = TestEnv::new();
  let bin = env.bin("pdftoppm");
  let config = env.config(&config_with("exit 0", &installs(&bin), &bin, ""));

  let output = env.cmd().arg("check").arg(&config).assert().code(1).get_output().clone();

  assert_eq!(count(&output.stdout, "✗"), 1);
  assert!(!bin.exists());
}

#[test]
fn check_single_package_from_flags() {
  let env = TestEnv::new();
  let bin = env.tool("pdftoppm", "[ \"$1\" = \"-h\" ]");

  env
    .cmd()
    .arg("check")
    .args(["--package", "poppler-utils", "--bin"])
    .arg(&bin)
    .args(["--probe", "-h"])
    .assert()
    .success()
    .stdout(predicate::str::contains("pdftoppm is installed and working"));
}

#[test]
fn tool_missing_from_path_fails_check() {
  let env = TestEnv::new();
  let empty = env.path("empty");
  std::fs::create_dir_all(&empty).unwrap();

  let output = env
    .cmd()
    .env("PATH", &empty)
    .arg("check")
    .args(["--package", "coreutils", "--bin", "true", "--probe", "--version"])
    .assert()
    .code(1)
    .get_output()
    .clone();

  assert_eq!(count(&output.stdout, "✗"), 1);
  assert_eq!(count(&output.stdout, "✓"), 0);
}

#[test]
fn configured_search_paths_are_used() {
  let env = TestEnv::new();
  env.tool("pdftoppm", "exit 0");
  let empty = env.path("empty");
  std::fs::create_dir_all(&empty).unwrap();
  let config = env.config(&format!(
    r#"
return {{
  search_paths = {{ [[{dir}]] }},
  requirements = {{ {{ package = "poppler-utils", bin = "pdftoppm" }} }},
}}
"#,
    dir = env.path("bin").display()
  ));

  env
    .cmd()
    .env("PATH", &empty)
    .arg("check")
    .arg(&config)
    .assert()
    .success()
    .stdout(predicate::str::contains("pdftoppm is installed and working"));
}

#[test]
fn check_failure_is_not_reported_as_provisioning() {
  let env = TestEnv::new();
  let bin = env.bin("pdftoppm");
  let config = env.config(&config_with("exit 0", &installs(&bin), &bin, ""));

  env
    .cmd()
    .arg("check")
    .arg(&config)
    .assert()
    .code(1)
    .stdout(predicate::str::contains("Check failed"))
    .stdout(predicate::str::contains("Provisioning failed").not());
}
