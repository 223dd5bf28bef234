//! Provisioning manifest.
//!
//! A manifest is the evaluated form of a `preflight.lua` config (or of a
//! single requirement given on the command line): which package manager to
//! drive, which tools must answer a probe, and what to launch afterwards.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::consts::CONFIG_FILE_NAME;
use crate::manager::{ManagerError, PackageManager};
use crate::platform::config_dir;
use crate::provision::Requirement;

/// Errors that can occur while loading a manifest.
#[derive(Debug, Error)]
pub enum ConfigError {
  #[error("config file not found: {}", path.display())]
  NotFound { path: PathBuf },

  /// Lua evaluation or conversion error, rendered to text.
  #[error("lua error: {0}")]
  Lua(String),

  #[error(transparent)]
  Manager(#[from] ManagerError),

  #[error("invalid config: {0}")]
  Invalid(String),
}

impl From<mlua::Error> for ConfigError {
  fn from(err: mlua::Error) -> Self {
    ConfigError::Lua(err.to_string())
  }
}

/// `manager = "apt"` or `manager = { refresh = {...}, install = {...} }`.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum ManagerDecl {
  Named(String),
  Custom {
    #[serde(default)]
    refresh: Option<Vec<String>>,
    install: Vec<String>,
  },
}

/// Table returned by a config file.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct RawManifest {
  #[serde(default)]
  pub manager: Option<ManagerDecl>,
  #[serde(default)]
  pub sudo: bool,
  #[serde(default)]
  pub strict_refresh: bool,
  #[serde(default)]
  pub search_paths: Vec<PathBuf>,
  #[serde(default)]
  pub requirements: Vec<Requirement>,
  #[serde(default)]
  pub launch: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Manifest {
  /// `None` means detect from the host.
  pub manager: Option<PackageManager>,
  pub sudo: bool,
  pub strict_refresh: bool,
  /// Extra directories searched for probed binaries after `PATH`.
  pub search_paths: Vec<PathBuf>,
  pub requirements: Vec<Requirement>,
  /// Command started once provisioning succeeds.
  pub launch: Vec<String>,
}

impl Manifest {
  /// Manifest for a single requirement, as given on the command line.
  pub fn single(requirement: Requirement) -> Self {
    Self {
      requirements: vec![requirement],
      ..Default::default()
    }
  }

  pub(crate) fn from_raw(raw: RawManifest) -> Result<Self, ConfigError> {
    let manager = match raw.manager {
      None => None,
      Some(ManagerDecl::Named(name)) => Some(name.parse::<PackageManager>()?),
      Some(ManagerDecl::Custom { refresh, install }) => Some(PackageManager::custom(refresh, install)?),
    };

    let manifest = Self {
      manager,
      sudo: raw.sudo,
      strict_refresh: raw.strict_refresh,
      search_paths: raw.search_paths,
      requirements: raw.requirements,
      launch: raw.launch,
    };
    manifest.validate()?;
    Ok(manifest)
  }

  pub fn validate(&self) -> Result<(), ConfigError> {
    if self.requirements.is_empty() {
      return Err(ConfigError::Invalid("no requirements declared".to_string()));
    }
    for requirement in &self.requirements {
      if requirement.package.trim().is_empty() {
        return Err(ConfigError::Invalid("requirement with empty package name".to_string()));
      }
      if requirement.bin().trim().is_empty() {
        return Err(ConfigError::Invalid(format!(
          "requirement '{}' has an empty bin",
          requirement.package
        )));
      }
    }
    Ok(())
  }

  /// The configured package manager, or the one detected on this host.
  pub fn resolve_manager(&self) -> Result<PackageManager, ManagerError> {
    match &self.manager {
      Some(manager) => Ok(manager.clone()),
      None => PackageManager::detect_current(),
    }
  }
}

/// Find the config file to load.
///
/// An explicit path is returned as-is. Otherwise `preflight.lua` in the
/// working directory wins over the one in the user config directory.
pub fn locate_config(explicit: Option<&Path>) -> Option<PathBuf> {
  locate_config_from(explicit, Path::new(""))
}

fn locate_config_from(explicit: Option<&Path>, working_dir: &Path) -> Option<PathBuf> {
  if let Some(path) = explicit {
    return Some(path.to_path_buf());
  }

  let local = working_dir.join(CONFIG_FILE_NAME);
  if local.is_file() {
    return Some(local);
  }

  config_dir()
    .map(|dir| dir.join(CONFIG_FILE_NAME))
    .filter(|path| path.is_file())
}
