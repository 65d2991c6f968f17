//! Prefix classification.
//!
//! Routes an environment variable to a secret backend by the prefix of its
//! name. The KMS prefix may be overridden per invocation; the Parameter Store
//! prefix is fixed.

use tracing::warn;

use super::constants;
use super::types::Backend;
use crate::error::{Error, Result};

/// Prefix bindings for one invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prefixes {
    kms: String,
    ssm: String,
}

impl Default for Prefixes {
    fn default() -> Self {
        Self {
            kms: constants::KMS_PREFIX.to_string(),
            ssm: constants::SSM_PREFIX.to_string(),
        }
    }
}

impl Prefixes {
    /// Bindings with a custom KMS prefix.
    ///
    /// # Errors
    ///
    /// Returns `Error::Usage` if the prefix is empty, since it would claim
    /// every variable in the environment.
    pub fn new(kms_prefix: &str) -> Result<Self> {
        if kms_prefix.is_empty() {
            return Err(Error::Usage("prefix must not be empty".to_string()));
        }
        if kms_prefix == constants::SSM_PREFIX {
            // KMS is checked first, so SSM_PS_ variables will go to KMS.
            warn!(prefix = kms_prefix, "KMS prefix shadows the SSM prefix");
        }
        Ok(Self {
            kms: kms_prefix.to_string(),
            ..Self::default()
        })
    }

    pub fn kms(&self) -> &str {
        &self.kms
    }

    pub fn ssm(&self) -> &str {
        &self.ssm
    }

    /// Prefix bound to a backend.
    pub fn prefix(&self, backend: Backend) -> &str {
        match backend {
            Backend::Kms => &self.kms,
            Backend::ParameterStore => &self.ssm,
        }
    }

    /// Backend owning `name`, if any.
    ///
    /// KMS is checked before SSM. Matching is exact and case sensitive.
    pub fn classify(&self, name: &str) -> Option<Backend> {
        if name.starts_with(&self.kms) {
            Some(Backend::Kms)
        } else if name.starts_with(&self.ssm) {
            Some(Backend::ParameterStore)
        } else {
            None
        }
    }

    /// Classify `name` and strip the matched prefix once.
    ///
    /// Returns the backend and the plaintext variable name.
    pub fn split<'n>(&self, name: &'n str) -> Option<(Backend, &'n str)> {
        let backend = self.classify(name)?;
        let plain = &name[self.prefix(backend).len()..];
        Some((backend, plain))
    }

    /// Whether any of `names` belongs to a backend.
    pub fn matches_any<'n>(&self, mut names: impl Iterator<Item = &'n str>) -> bool {
        names.any(|name| self.classify(name).is_some())
    }
}
