//! Test utilities for preflight-lib.

use std::path::{Path, PathBuf};

/// Write an executable `/bin/sh` script named `name` into `dir`.
#[cfg(unix)]
pub fn write_executable(dir: &Path, name: &str, body: &str) -> PathBuf {
  use std::os::unix::fs::PermissionsExt;

  let path = dir.join(name);
  std::fs::write(&path, format!("#!/bin/sh\n{}\n", body)).unwrap();
  std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
  path
}

/// Write a Lua config file into `dir` and return its path.
pub fn write_config(dir: &Path, content: &str) -> PathBuf {
  let path = dir.join("preflight.lua");
  std::fs::write(&path, content).unwrap();
  path
}
