//! Environment decryption.
//!
//! [`drive`] decrypts every classified variable of an environment snapshot;
//! [`assemble`] merges the result with the untouched variables to form the
//! child environment.

use tracing::debug;

use super::context::DecryptionContext;
use super::env::{ChildEnvironment, OutgoingEnvironment};
use super::prefix::Prefixes;
use super::provider::ProviderRegistry;
use super::types::{EnvEntry, Inherited};
use crate::error::{Error, Result};

/// Decrypt all classified entries, in input order.
///
/// Each classified entry yields `stripped name -> plaintext`. Unclassified
/// entries are ignored. The first failure aborts the whole run: nothing is
/// returned and later entries are not attempted.
///
/// # Errors
///
/// Returns `Error::Secret` naming the failing variable, or `Error::Usage`
/// for a variable that is nothing but a prefix.
pub fn drive(
    entries: &[EnvEntry],
    prefixes: &Prefixes,
    context: &DecryptionContext,
    registry: &ProviderRegistry<'_>,
) -> Result<OutgoingEnvironment> {
    let mut outgoing = OutgoingEnvironment::new();

    for entry in entries {
        let Some((backend, name)) = prefixes.split(&entry.name) else {
            continue;
        };
        if name.is_empty() {
            return Err(Error::Usage(format!(
                "${} has no variable name after the prefix",
                entry.name
            )));
        }

        debug!(variable = %entry.name, %backend, "decrypting");
        let secret = registry
            .decrypt(backend, &entry.value, context)
            .map_err(|source| Error::Secret {
                name: entry.name.clone(),
                source,
            })?;
        outgoing.set(name, secret.plaintext);
    }

    debug!(count = outgoing.len(), "decrypted environment");
    Ok(outgoing)
}

/// Build the child environment.
///
/// Unclassified entries pass through in order, followed by the opaque
/// (non UTF-8) variables unchanged. The classified source variables are
/// dropped and decrypted assignments are applied on top.
pub fn assemble(
    inherited: &Inherited,
    prefixes: &Prefixes,
    decrypted: OutgoingEnvironment,
) -> ChildEnvironment {
    let mut env: ChildEnvironment = inherited
        .entries
        .iter()
        .filter(|e| prefixes.classify(&e.name).is_none())
        .map(|e| (e.name.as_str(), e.value.as_str()))
        .collect();

    for (name, value) in &inherited.opaque {
        env.set_opaque(name.clone(), value.clone());
    }
    env.merge(decrypted);
    env
}
