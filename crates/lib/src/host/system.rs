//! [`Host`] backed by the real package manager and process table.

use std::path::PathBuf;
use std::process::Stdio;

use async_trait::async_trait;
use tokio::process::Command;
use tracing::{debug, info};

use super::{Host, HostError, Refresh};
use crate::lookup::find_executable;
use crate::manager::{CommandSpec, PackageManager};

/// Drives the host's package manager through subprocesses.
#[derive(Debug, Clone)]
pub struct SystemHost {
  /// `None` for hosts that are only probed.
  manager: Option<PackageManager>,
  sudo: bool,
  search_paths: Vec<PathBuf>,
}

impl SystemHost {
  pub fn new(manager: PackageManager) -> Self {
    Self {
      manager: Some(manager),
      sudo: false,
      search_paths: Vec::new(),
    }
  }

  /// A host that can probe binaries but has no package manager to drive.
  pub fn probe_only() -> Self {
    Self {
      manager: None,
      sudo: false,
      search_paths: Vec::new(),
    }
  }

  /// Prefix package-manager commands with `sudo`.
  pub fn with_sudo(mut self, sudo: bool) -> Self {
    self.sudo = sudo;
    self
  }

  /// Directories searched for probed binaries after `PATH`.
  pub fn with_search_paths(mut self, search_paths: Vec<PathBuf>) -> Self {
    self.search_paths = search_paths;
    self
  }

  pub fn manager(&self) -> Option<&PackageManager> {
    self.manager.as_ref()
  }
}

/// Run a package-manager command to completion and check its exit status.
async fn run_command(spec: &CommandSpec) -> Result<(), HostError> {
  info!(cmd = %spec, "running package manager");

  let output = Command::new(&spec.program)
    .args(&spec.args)
    .envs(spec.env.iter().map(|(k, v)| (k.as_str(), v.as_str())))
    .stdin(Stdio::null())
    .output()
    .await
    .map_err(|source| HostError::Spawn {
      program: spec.program.clone(),
      source,
    })?;

  let stdout = String::from_utf8_lossy(&output.stdout);
  let stderr = String::from_utf8_lossy(&output.stderr);
  if !stdout.trim().is_empty() {
    debug!(stdout = %stdout.trim(), "command stdout");
  }
  if !stderr.trim().is_empty() {
    debug!(stderr = %stderr.trim(), "command stderr");
  }

  if !output.status.success() {
    return Err(HostError::Failed {
      cmd: spec.to_string(),
      code: output.status.code(),
    });
  }

  Ok(())
}

#[async_trait]
impl Host for SystemHost {
  fn manager_name(&self) -> String {
    self.manager.as_ref().map_or("none", PackageManager::name).to_string()
  }

  async fn refresh_index(&self) -> Result<Refresh, HostError> {
    match self.manager.as_ref().and_then(|m| m.refresh_command(self.sudo)) {
      Some(spec) => {
        run_command(&spec).await?;
        Ok(Refresh::Refreshed)
      }
      None => Ok(Refresh::NotApplicable),
    }
  }

  async fn install(&self, package: &str) -> Result<(), HostError> {
    let manager = self.manager.as_ref().ok_or(HostError::NoPackageManager)?;
    run_command(&manager.install_command(package, self.sudo)).await
  }

  async fn probe(&self, bin: &str, flag: &str) -> Result<PathBuf, HostError> {
    let path = find_executable(bin, &self.search_paths).ok_or_else(|| HostError::NotFound { bin: bin.to_string() })?;
    debug!(bin = %bin, path = %path.display(), flag = %flag, "probing binary");

    let mut command = Command::new(&path);
    if !flag.is_empty() {
      command.arg(flag);
    }

    // Probe output is informational only; the exit status is the contract.
    let status = command
      .stdin(Stdio::null())
      .stdout(Stdio::null())
      .stderr(Stdio::null())
      .status()
      .await
      .map_err(|source| HostError::Spawn {
        program: path.display().to_string(),
        source,
      })?;

    if !status.success() {
      return Err(HostError::Failed {
        cmd: format!("{} {}", path.display(), flag).trim_end().to_string(),
        code: status.code(),
      });
    }

    Ok(path)
  }
}
