//! Implementation of the `preflight provision` command.

use std::process::ExitCode;
use std::time::Instant;

use anyhow::Result;

use preflight_lib::host::Host;
use preflight_lib::manifest::Manifest;
use preflight_lib::provision::{ProvisionError, ProvisionOptions, ProvisionReport, Provisioner};

use super::{TargetArgs, runtime, system_host};
use crate::output::print_info;
use crate::report::{Routine, report};

/// Refresh, install and verify, then report.
pub fn cmd_provision(target: &TargetArgs) -> Result<ExitCode> {
  let manifest = target.load_manifest()?;
  let started = Instant::now();
  let outcome = provision(&manifest)?;
  Ok(report(Routine::Provision, &outcome, started.elapsed()))
}

/// Run the full routine for `manifest` on this machine.
///
/// The outer error covers setup problems (no runtime, no package manager);
/// the inner result is the routine's own verdict.
pub(crate) fn provision(manifest: &Manifest) -> Result<Result<ProvisionReport, ProvisionError>> {
  let host = system_host(manifest)?;
  print_info(&format!(
    "Provisioning {} with {}",
    package_list(manifest),
    host.manager_name()
  ));

  let options = ProvisionOptions {
    strict_refresh: manifest.strict_refresh,
  };
  let rt = runtime()?;
  Ok(rt.block_on(Provisioner::new(&host, options).provision(&manifest.requirements)))
}

fn package_list(manifest: &Manifest) -> String {
  manifest
    .requirements
    .iter()
    .map(|r| r.package.as_str())
    .collect::<Vec<_>>()
    .join(", ")
}
