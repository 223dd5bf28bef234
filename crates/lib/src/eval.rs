//! Configuration file evaluation.
//!
//! A config file is a Lua chunk returning a table. Before it runs, a global
//! `preflight` table is registered so the config can branch per host:
//!
//! - `preflight.os` - Operating system name (e.g., "darwin", "linux")
//! - `preflight.arch` - CPU architecture (e.g., "x86_64", "aarch64")
//! - `preflight.platform` - Platform triple (e.g., "aarch64-darwin")
//! - `preflight.dir` - Directory of the config file being evaluated
//! - `preflight.which(name)` - Resolved path of an executable, or nil

use std::path::Path;

use mlua::prelude::*;
use tracing::{debug, info};

use crate::lookup::find_executable;
use crate::manifest::{ConfigError, Manifest, RawManifest};
use crate::platform::{arch_name, host_triple, os_name};

fn create_runtime(config_dir: &Path) -> LuaResult<Lua> {
  let lua = Lua::new();
  let preflight = lua.create_table()?;

  preflight.set("platform", host_triple())?;
  preflight.set("os", os_name())?;
  preflight.set("arch", arch_name())?;
  preflight.set("dir", config_dir.to_string_lossy().to_string())?;

  let which = lua.create_function(|_, name: String| {
    Ok(find_executable(&name, &[]).map(|path| path.to_string_lossy().to_string()))
  })?;
  preflight.set("which", which)?;

  lua.globals().set("preflight", preflight)?;
  Ok(lua)
}

/// Evaluate a Lua configuration file into a validated [`Manifest`].
pub fn evaluate_config(path: &Path) -> Result<Manifest, ConfigError> {
  if !path.is_file() {
    return Err(ConfigError::NotFound {
      path: path.to_path_buf(),
    });
  }

  let canonical_path = dunce::canonicalize(path).map_err(|e| ConfigError::Lua(format!("cannot resolve '{}': {}", path.display(), e)))?;
  let content = std::fs::read_to_string(&canonical_path)
    .map_err(|e| ConfigError::Lua(format!("cannot read '{}': {}", canonical_path.display(), e)))?;
  let config_dir = canonical_path.parent().unwrap_or(Path::new("."));

  info!(path = %canonical_path.display(), "evaluating config");

  let lua = create_runtime(config_dir)?;
  let value = lua
    .load(&content)
    .set_name(format!("@{}", canonical_path.display()))
    .eval::<LuaValue>()?;

  if !value.is_table() {
    return Err(ConfigError::Invalid(format!(
      "config must return a table, got {}",
      value.type_name()
    )));
  }

  let raw: RawManifest = lua.from_value(value)?;
  let manifest = Manifest::from_raw(raw)?;
  debug!(requirements = manifest.requirements.len(), "config evaluated");
  Ok(manifest)
}
