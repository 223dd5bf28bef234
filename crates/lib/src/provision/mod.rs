//! The provisioning routine.
//!
//! Runs `Start -> IndexRefreshed -> PackageInstalled -> Verified` against a
//! [`Host`]. The index is refreshed once, then each requirement is installed
//! and probed in order. The probe is authoritative: a package manager that
//! reports success without leaving a working binary behind still fails the
//! run. There are no retries; the first error ends the routine.

mod types;

use tracing::{info, warn};

pub use types::{ProvisionError, ProvisionOptions, ProvisionReport, Requirement, Stage, Verdict, VerifiedTool};

use crate::host::{Host, Refresh};

pub struct Provisioner<'a, H: Host + ?Sized> {
  host: &'a H,
  options: ProvisionOptions,
}

impl<'a, H: Host + ?Sized> Provisioner<'a, H> {
  pub fn new(host: &'a H, options: ProvisionOptions) -> Self {
    Self { host, options }
  }

  /// Refresh the package index.
  ///
  /// A failure is recorded as a warning unless `strict_refresh` is set, since
  /// a stale index can still install from cache.
  pub async fn refresh_package_index(&self, report: &mut ProvisionReport) -> Result<(), ProvisionError> {
    let manager = self.host.manager_name();
    match self.host.refresh_index().await {
      Ok(Refresh::Refreshed) => info!(manager = %manager, "package index refreshed"),
      Ok(Refresh::NotApplicable) => info!(manager = %manager, "package manager has no index to refresh"),
      Err(source) if self.options.strict_refresh => {
        return Err(ProvisionError::IndexRefresh { manager, source });
      }
      Err(source) => {
        warn!(manager = %manager, error = %source, "package index refresh failed, continuing with cached index");
        report
          .warnings
          .push(format!("failed to refresh {} package index: {}", manager, source));
      }
    }
    report.advance(Stage::IndexRefreshed);
    Ok(())
  }

  pub async fn install_package(&self, package: &str) -> Result<(), ProvisionError> {
    info!(package = %package, "installing package");
    self
      .host
      .install(package)
      .await
      .map_err(|source| ProvisionError::Install {
        package: package.to_string(),
        source,
      })
  }

  /// Probe the binary a requirement provides.
  pub async fn verify_tool(&self, requirement: &Requirement) -> Result<VerifiedTool, ProvisionError> {
    let bin = requirement.bin();
    let flag = requirement.probe_flag();
    info!(bin = %bin, flag = %flag, "verifying tool");

    let path = self
      .host
      .probe(bin, flag)
      .await
      .map_err(|source| ProvisionError::Verification {
        bin: bin.to_string(),
        source,
      })?;

    info!(bin = %bin, path = %path.display(), "tool verified");
    Ok(VerifiedTool {
      package: requirement.package.clone(),
      bin: bin.to_string(),
      path,
    })
  }

  /// Refresh, install and verify every requirement.
  pub async fn provision(&self, requirements: &[Requirement]) -> Result<ProvisionReport, ProvisionError> {
    let mut report = ProvisionReport::new();

    self.refresh_package_index(&mut report).await?;

    for requirement in requirements {
      self.install_package(&requirement.package).await?;
      report.installed.push(requirement.package.clone());
      report.advance(Stage::PackageInstalled);

      let verified = self.verify_tool(requirement).await?;
      report.verified.push(verified);
    }

    report.advance(Stage::Verified(Verdict::Success));
    Ok(report)
  }

  /// Verify requirements without touching the package manager.
  pub async fn check(&self, requirements: &[Requirement]) -> Result<ProvisionReport, ProvisionError> {
    let mut report = ProvisionReport::new();
    for requirement in requirements {
      let verified = self.verify_tool(requirement).await?;
      report.verified.push(verified);
    }
    report.advance(Stage::Verified(Verdict::Success));
    Ok(report)
  }
}
