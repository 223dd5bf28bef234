//! Implementation of the `preflight run` command.
//!
//! Provisions, then hands the process over to the launch command. The launch
//! command is never started when provisioning fails.

use std::io;
use std::process::{Command, ExitCode};
use std::time::Instant;

use anyhow::{Result, bail};
use tracing::info;

use super::TargetArgs;
use super::provision::provision;
use crate::output::{print_error, print_info};
use crate::report::{Routine, report};

pub fn cmd_run(target: &TargetArgs, command: &[String]) -> Result<ExitCode> {
  let manifest = target.load_manifest()?;

  let launch: &[String] = if command.is_empty() { &manifest.launch } else { command };
  let Some((program, args)) = launch.split_first() else {
    bail!("nothing to launch; pass a command after `--` or set `launch` in the config");
  };

  let started = Instant::now();
  let outcome = provision(&manifest)?;
  let code = report(Routine::Provision, &outcome, started.elapsed());
  if outcome.is_err() {
    return Ok(code);
  }

  print_info(&format!("Launching {}", launch.join(" ")));
  info!(program = %program, "launching");
  Ok(launch_command(program, args))
}

/// Replace the current process so the launched program receives signals
/// directly (it is often PID 1 in a container).
#[cfg(unix)]
fn launch_command(program: &str, args: &[String]) -> ExitCode {
  use std::os::unix::process::CommandExt;

  let err = Command::new(program).args(args).exec();
  launch_failed(program, &err)
}

#[cfg(not(unix))]
fn launch_command(program: &str, args: &[String]) -> ExitCode {
  let status = match Command::new(program).args(args).status() {
    Ok(status) => status,
    Err(err) => return launch_failed(program, &err),
  };

  match status.code() {
    Some(0) => ExitCode::SUCCESS,
    Some(code) => ExitCode::from(u8::try_from(code).unwrap_or(1)),
    None => ExitCode::FAILURE,
  }
}

/// The verdict line is already printed, so a launch failure only goes to
/// stderr. Exit codes follow the shell: 127 not found, 126 not executable.
fn launch_failed(program: &str, err: &io::Error) -> ExitCode {
  print_error(&format!("failed to launch {}: {}", program, err));
  match err.kind() {
    io::ErrorKind::NotFound => ExitCode::from(127),
    _ => ExitCode::from(126),
  }
}
