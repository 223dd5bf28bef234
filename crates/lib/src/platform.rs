//! Host platform detection.
//!
//! The provisioner only needs to know the OS to pick a package manager.
//! Anything it does not recognize is still reported by name so configs can
//! branch on it.

use std::fmt;
use std::path::PathBuf;

use crate::consts::APP_NAME;

/// Operating systems with a known package manager.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Os {
  Linux,
  MacOs,
  Windows,
}

impl Os {
  /// Detect the current operating system at runtime
  pub fn current() -> Option<Self> {
    Self::from_rust_name(std::env::consts::OS)
  }

  fn from_rust_name(name: &str) -> Option<Self> {
    match name {
      "linux" => Some(Self::Linux),
      "macos" => Some(Self::MacOs),
      "windows" => Some(Self::Windows),
      _ => None,
    }
  }

  pub fn as_str(&self) -> &'static str {
    match self {
      Self::Linux => "linux",
      Self::MacOs => "darwin",
      Self::Windows => "windows",
    }
  }
}

impl fmt::Display for Os {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.as_str())
  }
}

/// CPU architectures with a canonical name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Arch {
  X86_64,
  Aarch64,
}

impl Arch {
  fn from_rust_name(name: &str) -> Option<Self> {
    match name {
      "x86_64" => Some(Self::X86_64),
      "aarch64" => Some(Self::Aarch64),
      _ => None,
    }
  }

  pub fn as_str(&self) -> &'static str {
    match self {
      Self::X86_64 => "x86_64",
      Self::Aarch64 => "aarch64",
    }
  }
}

fn os_label(rust_name: &str) -> &str {
  match Os::from_rust_name(rust_name) {
    Some(os) => os.as_str(),
    None => rust_name,
  }
}

fn arch_label(rust_name: &str) -> &str {
  match Arch::from_rust_name(rust_name) {
    Some(arch) => arch.as_str(),
    None => rust_name,
  }
}

/// Name of the host OS as shown to configs (e.g., "darwin", "freebsd").
pub fn os_name() -> &'static str {
  os_label(std::env::consts::OS)
}

/// Name of the host architecture (e.g., "aarch64", "riscv64").
pub fn arch_name() -> &'static str {
  arch_label(std::env::consts::ARCH)
}

/// Platform identifier combining architecture and OS (e.g., "aarch64-darwin")
pub fn host_triple() -> String {
  format!("{}-{}", arch_name(), os_name())
}

/// Returns the directory holding the user-level configuration file.
///
/// Honors `XDG_CONFIG_HOME`, falling back to `~/.config`. Returns `None` when
/// neither variable is set.
#[cfg(not(windows))]
pub fn config_dir() -> Option<PathBuf> {
  let config_home = match std::env::var_os("XDG_CONFIG_HOME") {
    Some(dir) if !dir.is_empty() => PathBuf::from(dir),
    _ => PathBuf::from(std::env::var_os("HOME")?).join(".config"),
  };
  Some(config_home.join(APP_NAME))
}

#[cfg(windows)]
pub fn config_dir() -> Option<PathBuf> {
  std::env::var_os("APPDATA").map(|appdata| PathBuf::from(appdata).join(APP_NAME))
}
