//! Implementation of the `preflight init` command.

use std::path::Path;
use std::process::ExitCode;

use anyhow::{Context, Result};
use owo_colors::OwoColorize;

use preflight_lib::init::init;

use crate::output::{print_stat, print_success};

/// Write a starter `preflight.lua` into `dir`.
pub fn cmd_init(dir: &Path) -> Result<ExitCode> {
  let config = init(dir).context("Failed to initialize configuration")?;

  print_success("Created preflight config");
  print_stat("Config", &config.display().to_string());
  println!();
  println!("{}", "Next steps:".bold());
  println!("  1. Edit {} to list the tools your service needs", config.display().to_string().cyan());
  println!("  2. Run: {}", format!("preflight provision {}", config.display()).cyan());

  Ok(ExitCode::SUCCESS)
}
