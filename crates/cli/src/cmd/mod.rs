mod check;
mod info;
mod init;
mod provision;
mod run;

pub use check::cmd_check;
pub use info::cmd_info;
pub use init::cmd_init;
pub use provision::cmd_provision;
pub use run::cmd_run;

use std::path::PathBuf;

use anyhow::{Context, Result, anyhow};
use clap::Args;
use tracing::debug;

use preflight_lib::consts::CONFIG_ENV;
use preflight_lib::eval::evaluate_config;
use preflight_lib::host::SystemHost;
use preflight_lib::manager::PackageManager;
use preflight_lib::manifest::{Manifest, locate_config};
use preflight_lib::provision::Requirement;

/// Where the requirements come from, shared by every provisioning command.
#[derive(Debug, Args)]
pub struct TargetArgs {
  /// Path to the config file (default: ./preflight.lua)
  #[arg(env = CONFIG_ENV)]
  pub config: Option<PathBuf>,

  /// Provision a single package instead of reading a config file
  #[arg(long)]
  pub package: Option<String>,

  /// Binary provided by --package (default: the package name)
  #[arg(long, requires = "package")]
  pub bin: Option<String>,

  /// Flag used to probe the binary (default: -v)
  #[arg(long, requires = "package", allow_hyphen_values = true)]
  pub probe: Option<String>,

  /// Package manager to use (apt, dnf, apk, pacman, brew)
  #[arg(long)]
  pub manager: Option<String>,

  /// Run package-manager commands through sudo
  #[arg(long)]
  pub sudo: bool,

  /// Fail when the package index cannot be refreshed
  #[arg(long)]
  pub strict_refresh: bool,
}

impl TargetArgs {
  /// Build the manifest from flags or from the config file.
  pub fn load_manifest(&self) -> Result<Manifest> {
    let mut manifest = match &self.package {
      Some(package) => {
        let mut requirement = Requirement::new(package.as_str());
        requirement.bin = self.bin.clone();
        requirement.probe = self.probe.clone();
        let manifest = Manifest::single(requirement);
        manifest.validate()?;
        manifest
      }
      None => {
        let path = locate_config(self.config.as_deref()).ok_or_else(|| {
          anyhow!(
            "no config file found; pass a path, set {}, or use --package",
            CONFIG_ENV
          )
        })?;
        debug!(path = %path.display(), "using config file");
        evaluate_config(&path).with_context(|| format!("failed to load {}", path.display()))?
      }
    };

    if let Some(name) = &self.manager {
      manifest.manager = Some(name.parse::<PackageManager>()?);
    }
    manifest.sudo |= self.sudo;
    manifest.strict_refresh |= self.strict_refresh;
    Ok(manifest)
  }
}

/// Host for the current machine, configured from the manifest.
///
/// The OS only matters when the package manager has to be detected.
pub(crate) fn system_host(manifest: &Manifest) -> Result<SystemHost> {
  let manager = manifest.resolve_manager()?;
  Ok(
    SystemHost::new(manager)
      .with_sudo(manifest.sudo)
      .with_search_paths(manifest.search_paths.clone()),
  )
}

/// Host that only probes binaries, for commands that never install.
pub(crate) fn probe_host(manifest: &Manifest) -> SystemHost {
  SystemHost::probe_only().with_search_paths(manifest.search_paths.clone())
}

pub(crate) fn runtime() -> Result<tokio::runtime::Runtime> {
  tokio::runtime::Runtime::new().context("Failed to create async runtime")
}
