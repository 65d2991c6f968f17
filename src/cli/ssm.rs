//! SSM Parameter Store commands.

use std::io::Write;

use super::{payload, Global};
use crate::core::context::DecryptionContext;
use crate::core::provider::{SecretProvider, Session, SsmProvider};
use crate::error::Result;

/// Store `value` (or stdin) as parameter `name` and print the new version.
pub fn put(global: &Global, name: &str, value: Option<String>, kms_key: Option<&str>) -> Result<()> {
    let value = zeroize::Zeroizing::new(payload::read(value)?);

    let session = Session::connect(global.region.as_deref())?;
    let version = SsmProvider::new(&session).put(name, &value, kms_key)?;

    println!("{}", version);
    Ok(())
}

/// Print the decrypted value of parameter `name` (or the name on stdin).
pub fn get(global: &Global, name: Option<String>) -> Result<()> {
    let name = payload::read(name)?;

    let session = Session::connect(global.region.as_deref())?;
    let secret = SsmProvider::new(&session).decrypt(&name, &DecryptionContext::default())?;

    let mut stdout = std::io::stdout().lock();
    stdout.write_all(secret.plaintext.as_bytes())?;
    stdout.flush()?;
    Ok(())
}
