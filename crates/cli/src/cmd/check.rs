//! Implementation of the `preflight check` command.
//!
//! Probes every required binary without refreshing or installing anything.

use std::process::ExitCode;
use std::time::Instant;

use anyhow::Result;

use preflight_lib::provision::{ProvisionOptions, Provisioner};

use super::{TargetArgs, probe_host, runtime};
use crate::report::{Routine, report};

pub fn cmd_check(target: &TargetArgs) -> Result<ExitCode> {
  let manifest = target.load_manifest()?;
  let host = probe_host(&manifest);
  let rt = runtime()?;

  let started = Instant::now();
  let outcome = rt.block_on(Provisioner::new(&host, ProvisionOptions::default()).check(&manifest.requirements));
  Ok(report(Routine::Check, &outcome, started.elapsed()))
}
