//! Exec command.
//!
//! Decrypts prefixed environment variables, optionally switches user, and
//! replaces the process with the target command.

use tracing::debug;

use super::Global;
use crate::core::constants;
use crate::core::driver;
use crate::core::env::{ChildEnvironment, OutgoingEnvironment};
use crate::core::launch::{self, Exec};
use crate::core::prefix::Prefixes;
use crate::core::privilege::{self, ProcessCredentials, UserDatabase};
use crate::core::provider::{ProviderRegistry, Session};
use crate::core::types::Inherited;
use crate::error::{Error, Result};

/// Run the exec flow. Returns only on failure.
pub fn execute(global: &Global, prefix: &str, user: Option<&str>, command: &[String]) -> Error {
    match prepare(global, prefix, user, command) {
        Ok(env) => launch::launch(&Exec, command, &env),
        Err(e) => e,
    }
}

/// Everything up to the point of exec.
fn prepare(
    global: &Global,
    prefix: &str,
    user: Option<&str>,
    command: &[String],
) -> Result<ChildEnvironment> {
    if command.is_empty() {
        return Err(Error::Usage("no command specified".to_string()));
    }
    let prefixes = Prefixes::new(prefix)?;
    let context = global.decryption_context()?;
    let inherited = Inherited::capture();
    let entries = &inherited.entries;

    let decrypted = if prefixes.matches_any(entries.iter().map(|e| e.name.as_str())) {
        // Session and clients are dropped at the end of this block.
        let session = Session::connect(global.region.as_deref())?;
        let registry = ProviderRegistry::aws(&session);
        driver::drive(entries, &prefixes, &context, &registry)?
    } else {
        debug!("no encrypted variables found");
        OutgoingEnvironment::new()
    };

    let mut env = driver::assemble(&inherited, &prefixes, decrypted);

    if let Some(user) = user {
        // The child gets the target user's HOME.
        env.remove(constants::HOME);
        privilege::drop_privileges(
            user,
            &UserDatabase::default(),
            &mut ProcessCredentials,
            &mut env,
        )?;
    }

    Ok(env)
}
