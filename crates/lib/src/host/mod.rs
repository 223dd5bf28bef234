//! The host the provisioner acts on.
//!
//! The package-manager cache, the installed-package registry and the binaries
//! on `PATH` all belong to the host, not to the provisioner. [`Host`] is the
//! seam: [`SystemHost`] shells out to the real package manager, tests plug in
//! fakes.

mod system;

use std::path::PathBuf;

use async_trait::async_trait;
use thiserror::Error;

pub use system::SystemHost;

/// Errors reported by a [`Host`] operation.
#[derive(Debug, Error)]
pub enum HostError {
  /// The process could not be started at all.
  #[error("failed to run {program}: {source}")]
  Spawn {
    program: String,
    #[source]
    source: std::io::Error,
  },

  /// The process ran and exited unsuccessfully.
  #[error("{cmd} exited with {}", exit_description(.code))]
  Failed { cmd: String, code: Option<i32> },

  #[error("no package manager configured")]
  NoPackageManager,

  /// The probed binary is not on `PATH` or in any search directory.
  #[error("{bin} not found on PATH")]
  NotFound { bin: String },
}

fn exit_description(code: &Option<i32>) -> String {
  match code {
    Some(code) => format!("status {}", code),
    None => "no status (terminated by signal)".to_string(),
  }
}

/// What happened when the package index was refreshed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Refresh {
  Refreshed,
  /// The package manager has no index to refresh.
  NotApplicable,
}

/// Host operations used by the provisioning routine.
#[async_trait]
pub trait Host: Send + Sync {
  /// Name of the package manager driving this host, for messages.
  fn manager_name(&self) -> String;

  async fn refresh_index(&self) -> Result<Refresh, HostError>;

  async fn install(&self, package: &str) -> Result<(), HostError>;

  /// Run `bin` with `flag` and require exit status 0.
  ///
  /// Returns the resolved path of the binary that answered.
  async fn probe(&self, bin: &str, flag: &str) -> Result<PathBuf, HostError>;
}
