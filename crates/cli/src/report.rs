//! Final verdict of a provisioning run.
//!
//! Exactly one `✓` or `✗` line is printed per run; the process exit status
//! follows it.

use std::process::ExitCode;
use std::time::Duration;

use preflight_lib::provision::{ProvisionError, ProvisionReport};

use crate::output::{format_duration, print_failure, print_stat, print_success, print_warning};

/// Which routine produced the outcome being reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Routine {
  Provision,
  /// Verification only; nothing was refreshed or installed.
  Check,
}

/// Print the outcome and map it to an exit status.
pub fn report(routine: Routine, outcome: &Result<ProvisionReport, ProvisionError>, elapsed: Duration) -> ExitCode {
  match outcome {
    Ok(report) => {
      for warning in &report.warnings {
        print_warning(warning);
      }
      print_success(&success_line(report, elapsed));
      for tool in &report.verified {
        print_stat(&tool.bin, &tool.path.display().to_string());
      }
      ExitCode::SUCCESS
    }
    Err(err) => failure(&failure_line(routine, err)),
  }
}

/// Print a failure line and return the failing exit status.
pub fn failure(message: &str) -> ExitCode {
  print_failure(message);
  ExitCode::FAILURE
}

fn failure_line(routine: Routine, err: &ProvisionError) -> String {
  match routine {
    Routine::Provision => format!("Provisioning failed ({}): {}", err.stage(), err),
    Routine::Check => format!("Check failed: {}", err),
  }
}

fn success_line(report: &ProvisionReport, elapsed: Duration) -> String {
  let took = format_duration(elapsed);
  match report.verified.as_slice() {
    [only] => format!("{} is installed and working (in {})", only.bin, took),
    tools => format!("All {} tools are installed and working (in {})", tools.len(), took),
  }
}
