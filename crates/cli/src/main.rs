mod cmd;
mod output;
mod report;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use cmd::{TargetArgs, cmd_check, cmd_info, cmd_init, cmd_provision, cmd_run};

/// preflight - install and verify native tools before a service starts
#[derive(Parser)]
#[command(name = "preflight")]
#[command(author, version, about, long_about = None)]
struct Cli {
  /// Enable verbose output
  #[arg(short, long, global = true)]
  verbose: bool,

  #[command(subcommand)]
  command: Commands,
}

#[derive(Subcommand)]
enum Commands {
  /// Refresh the package index, install every requirement and verify it
  Provision {
    #[command(flatten)]
    target: TargetArgs,
  },

  /// Verify requirements without installing anything
  Check {
    #[command(flatten)]
    target: TargetArgs,
  },

  /// Provision, then launch a command once everything is verified
  Run {
    #[command(flatten)]
    target: TargetArgs,

    /// Command to launch (default: `launch` from the config)
    #[arg(last = true)]
    command: Vec<String>,
  },

  /// Write a starter preflight.lua
  Init {
    /// Directory to write the config into
    #[arg(default_value = ".")]
    dir: PathBuf,
  },

  /// Show platform, detected package manager and config location
  Info,
}

fn init_tracing(verbose: bool) {
  // Logs go to stderr so stdout only carries results.
  let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(if verbose { "debug" } else { "error" }));
  tracing_subscriber::fmt()
    .with_env_filter(filter)
    .with_writer(std::io::stderr)
    .without_time()
    .init();
}

fn main() -> ExitCode {
  let cli = Cli::parse();
  init_tracing(cli.verbose);

  let result = match &cli.command {
    Commands::Provision { target } => cmd_provision(target),
    Commands::Check { target } => cmd_check(target),
    Commands::Run { target, command } => cmd_run(target, command),
    Commands::Init { dir } => cmd_init(dir),
    Commands::Info => Ok(cmd_info()),
  };

  result.unwrap_or_else(|err| report::failure(&format!("{:#}", err)))
}
