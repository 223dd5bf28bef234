//! preflight-lib: install and verify native tools before a service starts.
//!
//! The core is the provisioning routine in [`provision`]: refresh the package
//! index, install each required package, then probe the binary it provides.
//! Only a successful probe counts as success. Host access goes through the
//! [`host::Host`] trait so the routine can run against fakes.

pub mod consts;
pub mod eval;
pub mod host;
pub mod init;
pub mod lookup;
pub mod manager;
pub mod manifest;
pub mod platform;
pub mod provision;

#[cfg(test)]
mod testutil;
