//! Executable lookup.
//!
//! Resolves a probed binary name the way a shell would (`PATH` order), then
//! falls back to caller-supplied directories for tools that are installed but
//! not on the current `PATH`.

use std::env;
use std::path::{Path, PathBuf};

use tracing::trace;

/// Find an executable by name.
///
/// Names containing a path separator are checked as-is. Bare names are
/// searched in `PATH` first and then in `extra_dirs`, in order. The returned
/// path is canonicalized when possible.
pub fn find_executable(name: &str, extra_dirs: &[PathBuf]) -> Option<PathBuf> {
  if name.is_empty() {
    return None;
  }

  let as_path = Path::new(name);
  if as_path.is_absolute() || as_path.components().count() > 1 {
    return is_executable(as_path).then(|| canonical(as_path));
  }

  let path_dirs = env::var_os("PATH")
    .map(|paths| env::split_paths(&paths).collect::<Vec<_>>())
    .unwrap_or_default();

  path_dirs
    .iter()
    .chain(extra_dirs.iter())
    .flat_map(|dir| candidates(dir, name))
    .find(|candidate| {
      trace!(candidate = %candidate.display(), "checking executable candidate");
      is_executable(candidate)
    })
    .map(|found| canonical(&found))
}

fn canonical(path: &Path) -> PathBuf {
  dunce::canonicalize(path).unwrap_or_else(|_| path.to_path_buf())
}

#[cfg(not(windows))]
fn candidates(dir: &Path, name: &str) -> Vec<PathBuf> {
  vec![dir.join(name)]
}

#[cfg(windows)]
fn candidates(dir: &Path, name: &str) -> Vec<PathBuf> {
  if Path::new(name).extension().is_some() {
    return vec![dir.join(name)];
  }
  ["exe", "cmd", "bat"]
    .iter()
    .map(|ext| dir.join(format!("{}.{}", name, ext)))
    .collect()
}

#[cfg(unix)]
fn is_executable(path: &Path) -> bool {
  use std::os::unix::fs::PermissionsExt;

  path
    .metadata()
    .map(|meta| meta.is_file() && meta.permissions().mode() & 0o111 != 0)
    .unwrap_or(false)
}

#[cfg(not(unix))]
fn is_executable(path: &Path) -> bool {
  path.is_file()
}
