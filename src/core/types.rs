//! Domain types shared across modules.

use std::ffi::OsString;
use std::fmt;

use tracing::debug;

use super::constants::exit;

/// Secret backend that owns an environment variable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Backend {
    /// AWS KMS: the value is base64 ciphertext.
    Kms,
    /// SSM Parameter Store: the value is a parameter name.
    ParameterStore,
}

impl Backend {
    /// Short display name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Kms => "KMS",
            Self::ParameterStore => "SSM",
        }
    }

    /// Exit code used when this backend fails.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Kms => exit::KMS,
            Self::ParameterStore => exit::SSM,
        }
    }
}

impl fmt::Display for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One variable of the inherited environment.
#[derive(Clone, PartialEq, Eq)]
pub struct EnvEntry {
    pub name: String,
    pub value: String,
}

impl EnvEntry {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }

    /// Parse a `NAME=VALUE` string, splitting on the first `=`.
    pub fn parse(pair: &str) -> Option<Self> {
        let (name, value) = pair.split_once('=')?;
        Some(Self::new(name, value))
    }
}

/// Snapshot of the process environment.
#[derive(Default)]
pub struct Inherited {
    /// Variables with a UTF-8 name and value, in table order.
    pub entries: Vec<EnvEntry>,
    /// Variables with a non UTF-8 name or value. They never carry a prefix
    /// and pass to the child byte for byte.
    pub opaque: Vec<(OsString, OsString)>,
}

impl Inherited {
    /// Capture the current process environment.
    pub fn capture() -> Self {
        Self::from_os(std::env::vars_os())
    }

    pub fn from_os(vars: impl IntoIterator<Item = (OsString, OsString)>) -> Self {
        let mut inherited = Self::default();
        for (name, value) in vars {
            if let (Some(n), Some(v)) = (name.to_str(), value.to_str()) {
                inherited.entries.push(EnvEntry::new(n, v));
                continue;
            }
            debug!(variable = %name.to_string_lossy(), "passing through non UTF-8 variable");
            inherited.opaque.push((name, value));
        }
        inherited
    }
}

// Values may be ciphertext or parameter names, keep them out of debug output.
impl fmt::Debug for EnvEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EnvEntry")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}
