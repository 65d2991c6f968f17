//! Encrypt and decrypt commands.

use std::io::Write;

use super::{payload, Global};
use crate::core::provider::{KmsProvider, SecretProvider, Session};
use crate::core::types::Backend;
use crate::error::{BackendError, BackendErrorKind, Result};

/// Encrypt `plaintext` (or stdin) under `key` and print the base64 ciphertext.
pub fn encrypt(global: &Global, key: &str, plaintext: Option<String>) -> Result<()> {
    let context = global.decryption_context()?;
    let plaintext = zeroize::Zeroizing::new(payload::read(plaintext)?);

    let session = Session::connect(global.region.as_deref())?;
    let ciphertext = KmsProvider::new(&session).encrypt(&plaintext, key, &context)?;

    println!("{}", ciphertext);
    Ok(())
}

/// Decrypt `ciphertext` (or stdin) and print the plaintext.
///
/// The plaintext is written without a trailing newline. With `print_key`
/// the ARN of the decrypting key is printed instead.
pub fn decrypt(global: &Global, ciphertext: Option<String>, print_key: bool) -> Result<()> {
    let context = global.decryption_context()?;
    let ciphertext = payload::read(ciphertext)?;

    let session = Session::connect(global.region.as_deref())?;
    let secret = KmsProvider::new(&session).decrypt(&ciphertext, &context)?;

    if print_key {
        let key = secret.key_id.ok_or_else(|| {
            BackendError::new(Backend::Kms, BackendErrorKind::MissingOutput("key id"))
        })?;
        println!("{}", key);
    } else {
        let mut stdout = std::io::stdout().lock();
        stdout.write_all(secret.plaintext.as_bytes())?;
        stdout.flush()?;
    }
    Ok(())
}
