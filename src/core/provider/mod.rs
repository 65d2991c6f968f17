//! Secret providers.
//!
//! A [`SecretProvider`] turns an environment variable's raw value into
//! plaintext with exactly one remote call. Providers are selected through a
//! [`ProviderRegistry`] keyed by [`Backend`].
//!
//! - `aws`: shared SDK session (runtime + config)
//! - `kms`: AWS KMS, the token is base64 ciphertext
//! - `ssm`: SSM Parameter Store, the token is a parameter name

use std::collections::BTreeMap;
use std::fmt;

use zeroize::Zeroizing;

use super::context::DecryptionContext;
use super::types::Backend;
use crate::error::{BackendError, BackendErrorKind};

pub mod aws;
pub mod kms;
pub mod ssm;

pub use aws::Session;
pub use kms::KmsProvider;
pub use ssm::SsmProvider;

/// A decrypted secret.
pub struct Secret {
    pub plaintext: Zeroizing<String>,
    /// Key that resolved the ciphertext, when the backend reports one.
    pub key_id: Option<String>,
}

impl Secret {
    pub fn new(plaintext: impl Into<String>) -> Self {
        Self {
            plaintext: Zeroizing::new(plaintext.into()),
            key_id: None,
        }
    }
}

impl fmt::Debug for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Secret")
            .field("key_id", &self.key_id)
            .finish_non_exhaustive()
    }
}

/// Decrypt capability of one backend.
///
/// Implementations make a single synchronous call per `decrypt`: no caching,
/// no retries.
pub trait SecretProvider {
    /// Backend this provider serves.
    fn backend(&self) -> Backend;

    /// Resolve `token` to plaintext.
    ///
    /// `context` is the invocation's KMS encryption context; providers that
    /// have no use for it ignore it.
    fn decrypt(
        &self,
        token: &str,
        context: &DecryptionContext,
    ) -> std::result::Result<Secret, BackendError>;
}

/// Providers keyed by backend.
#[derive(Default)]
pub struct ProviderRegistry<'a> {
    providers: BTreeMap<Backend, Box<dyn SecretProvider + 'a>>,
}

impl<'a> ProviderRegistry<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with the AWS KMS and SSM providers bound to `session`.
    pub fn aws(session: &'a Session) -> Self {
        Self::new()
            .with(KmsProvider::new(session))
            .with(SsmProvider::new(session))
    }

    /// Register a provider, replacing any provider for the same backend.
    pub fn with(mut self, provider: impl SecretProvider + 'a) -> Self {
        self.providers.insert(provider.backend(), Box::new(provider));
        self
    }

    pub fn get(&self, backend: Backend) -> Option<&(dyn SecretProvider + 'a)> {
        self.providers.get(&backend).map(|p| p.as_ref())
    }

    /// Dispatch `token` to the provider registered for `backend`.
    pub fn decrypt(
        &self,
        backend: Backend,
        token: &str,
        context: &DecryptionContext,
    ) -> std::result::Result<Secret, BackendError> {
        let provider = self
            .get(backend)
            .ok_or_else(|| BackendError::new(backend, BackendErrorKind::Unregistered))?;
        provider.decrypt(token, context)
    }
}
