//! End-to-end tests driving `preflight` against fake package managers and
//! fake tools written as shell scripts.

#![cfg(unix)]

mod common;
mod provision_tests;
