//! Scaffold a new `preflight.lua`.

mod templates;

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::info;

use crate::consts::CONFIG_FILE_NAME;

pub use templates::CONFIG_TEMPLATE;

/// Errors that can occur during initialization.
#[derive(Debug, Error)]
pub enum InitError {
  #[error("file already exists: {}", path.display())]
  PathExists { path: PathBuf },

  #[error("failed to create directory {}: {source}", path.display())]
  CreateDir { path: PathBuf, source: std::io::Error },

  #[error("failed to write file {}: {source}", path.display())]
  WriteFile { path: PathBuf, source: std::io::Error },
}

/// Write a starter config into `dir`, creating the directory if needed.
///
/// Refuses to overwrite an existing config. Returns the path written.
pub fn init(dir: &Path) -> Result<PathBuf, InitError> {
  fs::create_dir_all(dir).map_err(|e| InitError::CreateDir {
    path: dir.to_path_buf(),
    source: e,
  })?;

  let config = dir.join(CONFIG_FILE_NAME);
  if config.exists() {
    return Err(InitError::PathExists { path: config });
  }

  fs::write(&config, CONFIG_TEMPLATE).map_err(|e| InitError::WriteFile {
    path: config.clone(),
    source: e,
  })?;

  info!(path = %config.display(), "config written");
  Ok(config)
}
