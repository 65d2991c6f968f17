//! AWS KMS provider.
//!
//! Ciphertext travels as standard base64. KMS embeds the key reference in
//! the blob, so decryption needs only the blob and the encryption context.

use ::base64::engine::general_purpose::STANDARD;
use ::base64::Engine;
use aws_sdk_kms::error::DisplayErrorContext;
use aws_sdk_kms::primitives::Blob;
use tracing::trace;

use super::{Secret, SecretProvider, Session};
use crate::core::context::DecryptionContext;
use crate::core::types::Backend;
use crate::error::{BackendError, BackendErrorKind};

type Result<T> = std::result::Result<T, BackendError>;

/// KMS-backed secrets.
pub struct KmsProvider<'a> {
    session: &'a Session,
    client: aws_sdk_kms::Client,
}

impl<'a> KmsProvider<'a> {
    pub fn new(session: &'a Session) -> Self {
        Self {
            session,
            client: session.kms(),
        }
    }

    /// Encrypt `plaintext` under `key_id` (key id, ARN, or alias).
    ///
    /// Returns the base64 ciphertext blob.
    pub fn encrypt(
        &self,
        plaintext: &str,
        key_id: &str,
        context: &DecryptionContext,
    ) -> Result<String> {
        trace!(key_id, plaintext_len = plaintext.len(), "encrypting with KMS");

        let output = self
            .session
            .block_on(
                self.client
                    .encrypt()
                    .key_id(key_id)
                    .set_encryption_context(context.to_request())
                    .plaintext(Blob::new(plaintext.as_bytes()))
                    .send(),
            )
            .map_err(|e| BackendError::request(Backend::Kms, DisplayErrorContext(&e).to_string()))?;

        let blob = output
            .ciphertext_blob()
            .ok_or_else(|| missing("ciphertext"))?;
        let encoded = STANDARD.encode(blob.as_ref());

        trace!(ciphertext_len = encoded.len(), "encrypted with KMS");
        Ok(encoded)
    }
}

impl SecretProvider for KmsProvider<'_> {
    fn backend(&self) -> Backend {
        Backend::Kms
    }

    fn decrypt(&self, token: &str, context: &DecryptionContext) -> Result<Secret> {
        trace!(ciphertext_len = token.len(), "decrypting with KMS");
        let blob = decode(token)?;

        let output = self
            .session
            .block_on(
                self.client
                    .decrypt()
                    .ciphertext_blob(Blob::new(blob))
                    .set_encryption_context(context.to_request())
                    .send(),
            )
            .map_err(|e| BackendError::request(Backend::Kms, DisplayErrorContext(&e).to_string()))?;

        let plaintext = output.plaintext().ok_or_else(|| missing("plaintext"))?;
        let plaintext = String::from_utf8(plaintext.as_ref().to_vec())
            .map_err(|_| BackendError::new(Backend::Kms, BackendErrorKind::NotUtf8))?;

        Ok(Secret {
            plaintext: plaintext.into(),
            key_id: output.key_id().map(str::to_string),
        })
    }
}

/// Decode a base64 ciphertext token.
pub fn decode(token: &str) -> Result<Vec<u8>> {
    STANDARD
        .decode(token)
        .map_err(|e| BackendError::new(Backend::Kms, BackendErrorKind::Decode(e)))
}

fn missing(what: &'static str) -> BackendError {
    BackendError::new(Backend::Kms, BackendErrorKind::MissingOutput(what))
}
