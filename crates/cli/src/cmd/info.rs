use std::process::ExitCode;

use preflight_lib::manager::PackageManager;
use preflight_lib::manifest::locate_config;
use preflight_lib::platform::host_triple;

use crate::output::print_stat;

pub fn cmd_info() -> ExitCode {
  println!("System:");
  print_stat("Platform", &host_triple());

  let manager = match PackageManager::detect_current() {
    Ok(manager) => manager.to_string(),
    Err(err) => err.to_string(),
  };
  print_stat("Package manager", &manager);

  let config = locate_config(None)
    .map(|path| path.display().to_string())
    .unwrap_or_else(|| "none".to_string());
  print_stat("Config", &config);

  ExitCode::SUCCESS
}
