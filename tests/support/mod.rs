//! Test support utilities for shush integration tests.
//!
//! Provides an isolated environment for running the shush binary.

#![allow(dead_code)]

pub mod assertions;
pub mod commands;
pub mod skip;

#[allow(unused_imports)]
pub use assertions::*;

use tempfile::TempDir;

/// Test environment with an isolated home directory.
///
/// Child processes get a scrubbed environment: no AWS configuration from
/// the host, no instance metadata lookups, and no inherited secret
/// variables, so tests never reach a real backend by accident.
pub struct Test {
    /// Temporary home directory
    pub home: TempDir,
}

impl Test {
    pub fn new() -> Self {
        let home = TempDir::new().expect("failed to create temp home");
        Self { home }
    }
}

impl Default for Test {
    fn default() -> Self {
        Self::new()
    }
}
