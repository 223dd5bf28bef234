//! Types for the provisioning routine.

use std::fmt;
use std::path::PathBuf;

use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

use crate::consts::DEFAULT_PROBE_FLAG;
use crate::host::HostError;

/// A native tool that must be installed and answer a probe.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Requirement {
  /// Package to install (e.g. `poppler-utils`).
  pub package: String,

  /// Binary the package provides. Defaults to the package name.
  #[serde(default)]
  pub bin: Option<String>,

  /// Informational flag that exits 0 without side effects.
  #[serde(default)]
  pub probe: Option<String>,
}

impl Requirement {
  pub fn new(package: impl Into<String>) -> Self {
    Self {
      package: package.into(),
      bin: None,
      probe: None,
    }
  }

  pub fn with_bin(mut self, bin: impl Into<String>) -> Self {
    self.bin = Some(bin.into());
    self
  }

  pub fn with_probe(mut self, probe: impl Into<String>) -> Self {
    self.probe = Some(probe.into());
    self
  }

  pub fn bin(&self) -> &str {
    self.bin.as_deref().unwrap_or(&self.package)
  }

  pub fn probe_flag(&self) -> &str {
    self.probe.as_deref().unwrap_or(DEFAULT_PROBE_FLAG)
  }
}

/// Final verdict of the routine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
  Success,
  Failure,
}

/// Position in `Start -> IndexRefreshed -> PackageInstalled -> Verified`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
  Start,
  IndexRefreshed,
  PackageInstalled,
  Verified(Verdict),
}

impl fmt::Display for Stage {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Stage::Start => write!(f, "start"),
      Stage::IndexRefreshed => write!(f, "index refreshed"),
      Stage::PackageInstalled => write!(f, "package installed"),
      Stage::Verified(Verdict::Success) => write!(f, "verified"),
      Stage::Verified(Verdict::Failure) => write!(f, "verification failed"),
    }
  }
}

/// Why provisioning stopped. Every variant is terminal.
#[derive(Debug, Error)]
pub enum ProvisionError {
  /// Only raised when index refresh failures are strict.
  #[error("failed to refresh {manager} package index: {source}")]
  IndexRefresh {
    manager: String,
    #[source]
    source: HostError,
  },

  #[error("failed to install {package}: {source}")]
  Install {
    package: String,
    #[source]
    source: HostError,
  },

  #[error("{bin} is not usable: {source}")]
  Verification {
    bin: String,
    #[source]
    source: HostError,
  },
}

impl ProvisionError {
  /// Stage the routine stopped in.
  ///
  /// A failed probe still completes verification, with a failing verdict.
  pub fn stage(&self) -> Stage {
    match self {
      ProvisionError::IndexRefresh { .. } => Stage::Start,
      ProvisionError::Install { .. } => Stage::IndexRefreshed,
      ProvisionError::Verification { .. } => Stage::Verified(Verdict::Failure),
    }
  }
}

/// A binary that answered its probe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifiedTool {
  pub package: String,
  pub bin: String,
  pub path: PathBuf,
}

/// Summary of a successful run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProvisionReport {
  pub stage: Stage,
  /// Packages handed to the package manager, in order.
  pub installed: Vec<String>,
  pub verified: Vec<VerifiedTool>,
  /// Non-fatal problems, such as a failed index refresh.
  pub warnings: Vec<String>,
}

impl ProvisionReport {
  pub(crate) fn new() -> Self {
    Self {
      stage: Stage::Start,
      installed: Vec::new(),
      verified: Vec::new(),
      warnings: Vec::new(),
    }
  }

  pub(crate) fn advance(&mut self, stage: Stage) {
    debug!(from = %self.stage, to = %stage, "stage reached");
    self.stage = stage;
  }
}

/// Knobs for a provisioning run.
#[derive(Debug, Clone, Default)]
pub struct ProvisionOptions {
  /// Treat a failed index refresh as fatal instead of a warning.
  pub strict_refresh: bool,
}
