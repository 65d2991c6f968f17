//! Core library components.
//!
//! The secret injection pipeline: classify inherited variables, decrypt them
//! through the matching provider, assemble the child environment, optionally
//! drop privileges, then exec.

pub mod constants;
pub mod context;
pub mod driver;
pub mod env;
pub mod launch;
pub mod prefix;
pub mod privilege;
pub mod provider;
pub mod types;
