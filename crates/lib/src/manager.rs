//! Host package managers.
//!
//! Each known manager maps to a fixed pair of argv templates: one to refresh
//! the package index and one to install a package. Hosts that use something
//! else can describe their own commands with [`PackageManager::Custom`].

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::lookup::find_executable;
use crate::platform::Os;

/// Errors raised while choosing or describing a package manager.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ManagerError {
  #[error("unknown package manager '{0}' (expected one of: apt, dnf, apk, pacman, brew)")]
  Unknown(String),

  #[error("no supported package manager found on {os}")]
  NotDetected { os: String },

  #[error("custom package manager needs a non-empty install command")]
  EmptyInstall,
}

/// A single subprocess invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
  pub program: String,
  pub args: Vec<String>,
  pub env: Vec<(String, String)>,
}

impl CommandSpec {
  fn from_argv(argv: &[String]) -> Option<Self> {
    let (program, args) = argv.split_first()?;
    Some(Self {
      program: program.clone(),
      args: args.to_vec(),
      env: Vec::new(),
    })
  }

  fn known(program: &str, args: &[&str]) -> Self {
    Self {
      program: program.to_string(),
      args: args.iter().map(|a| a.to_string()).collect(),
      env: Vec::new(),
    }
  }

  fn with_env(mut self, key: &str, value: &str) -> Self {
    self.env.push((key.to_string(), value.to_string()));
    self
  }

  /// Run through `sudo` when asked.
  ///
  /// sudo resets the environment, so variables travel as `KEY=VALUE`
  /// arguments ahead of the program.
  fn elevated(mut self, sudo: bool) -> Self {
    if !sudo {
      return self;
    }
    let mut args: Vec<String> = self.env.drain(..).map(|(k, v)| format!("{}={}", k, v)).collect();
    args.push(std::mem::take(&mut self.program));
    args.append(&mut self.args);
    self.program = "sudo".to_string();
    self.args = args;
    self
  }
}

impl fmt::Display for CommandSpec {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.program)?;
    for arg in &self.args {
      write!(f, " {}", arg)?;
    }
    Ok(())
  }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PackageManager {
  Apt,
  Dnf,
  Apk,
  Pacman,
  Brew,
  /// User-described commands. The package name is appended to `install`.
  Custom {
    refresh: Option<Vec<String>>,
    install: Vec<String>,
  },
}

impl PackageManager {
  pub fn custom(refresh: Option<Vec<String>>, install: Vec<String>) -> Result<Self, ManagerError> {
    if install.is_empty() {
      return Err(ManagerError::EmptyInstall);
    }
    let refresh = refresh.filter(|argv| !argv.is_empty());
    Ok(Self::Custom { refresh, install })
  }

  pub fn name(&self) -> &'static str {
    match self {
      Self::Apt => "apt",
      Self::Dnf => "dnf",
      Self::Apk => "apk",
      Self::Pacman => "pacman",
      Self::Brew => "brew",
      Self::Custom { .. } => "custom",
    }
  }

  /// The executable whose presence identifies this manager.
  fn program(&self) -> Option<&'static str> {
    match self {
      Self::Apt => Some("apt-get"),
      Self::Dnf => Some("dnf"),
      Self::Apk => Some("apk"),
      Self::Pacman => Some("pacman"),
      Self::Brew => Some("brew"),
      Self::Custom { .. } => None,
    }
  }

  /// Command refreshing the package index, if this manager has one.
  pub fn refresh_command(&self, sudo: bool) -> Option<CommandSpec> {
    match self {
      Self::Apt => Some(CommandSpec::known("apt-get", &["update"]).elevated(sudo)),
      Self::Dnf => Some(CommandSpec::known("dnf", &["makecache"]).elevated(sudo)),
      Self::Apk => Some(CommandSpec::known("apk", &["update"]).elevated(sudo)),
      Self::Pacman => Some(CommandSpec::known("pacman", &["-Sy", "--noconfirm"]).elevated(sudo)),
      // Homebrew refuses to run as root
      Self::Brew => Some(CommandSpec::known("brew", &["update"])),
      Self::Custom { refresh, .. } => refresh.as_deref().and_then(CommandSpec::from_argv),
    }
  }

  pub fn install_command(&self, package: &str, sudo: bool) -> CommandSpec {
    match self {
      Self::Apt => CommandSpec::known("apt-get", &["install", "-y", "--no-install-recommends", package])
        .with_env("DEBIAN_FRONTEND", "noninteractive")
        .elevated(sudo),
      Self::Dnf => CommandSpec::known("dnf", &["install", "-y", package]).elevated(sudo),
      Self::Apk => CommandSpec::known("apk", &["add", "--no-cache", package]).elevated(sudo),
      Self::Pacman => CommandSpec::known("pacman", &["-S", "--noconfirm", "--needed", package]).elevated(sudo),
      Self::Brew => CommandSpec::known("brew", &["install", package]),
      Self::Custom { install, .. } => {
        let mut argv = install.clone();
        argv.push(package.to_string());
        // `custom` rejects an empty install argv, so there is always a program.
        CommandSpec::from_argv(&argv).unwrap_or_else(|| CommandSpec::known(package, &[]))
      }
    }
  }

  /// Detect the package manager of the running host.
  pub fn detect_current() -> Result<Self, ManagerError> {
    match Os::current() {
      Some(os) => Self::detect(os),
      None => Err(ManagerError::NotDetected {
        os: std::env::consts::OS.to_string(),
      }),
    }
  }

  /// Detect the package manager for `os` by looking for its executable.
  pub fn detect(os: Os) -> Result<Self, ManagerError> {
    Self::detect_with(os, |program| find_executable(program, &[]).is_some())
  }

  /// Detection with an injectable presence check.
  pub fn detect_with(os: Os, mut present: impl FnMut(&str) -> bool) -> Result<Self, ManagerError> {
    // Linux candidates are listed in preference order.
    let candidates = match os {
      Os::Linux => vec![Self::Apt, Self::Dnf, Self::Apk, Self::Pacman],
      Os::MacOs => vec![Self::Brew],
      Os::Windows => Vec::new(),
    };

    candidates
      .into_iter()
      .find(|manager| manager.program().is_some_and(&mut present))
      .ok_or_else(|| ManagerError::NotDetected {
        os: os.as_str().to_string(),
      })
  }
}

impl FromStr for PackageManager {
  type Err = ManagerError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s.trim().to_ascii_lowercase().as_str() {
      "apt" | "apt-get" => Ok(Self::Apt),
      "dnf" | "yum" => Ok(Self::Dnf),
      "apk" => Ok(Self::Apk),
      "pacman" => Ok(Self::Pacman),
      "brew" | "homebrew" => Ok(Self::Brew),
      other => Err(ManagerError::Unknown(other.to_string())),
    }
  }
}

impl fmt::Display for PackageManager {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.name())
  }
}
