//! Process launch.
//!
//! Resolves the target command and replaces the current process image with
//! it. On success nothing after [`launch`] runs, so every resource that must
//! be released (SDK clients, the async runtime) has to be gone before the
//! call.

use std::ffi::OsString;
use std::io;
use std::path::{Path, PathBuf};

use tracing::debug;

use super::constants;
use super::env::ChildEnvironment;
use crate::error::{Error, Result};

/// Process-image replacement primitive.
pub trait ProcessImage {
    /// Replace the current process. Returns only on failure.
    fn replace(&self, program: &Path, argv: &[String], env: &ChildEnvironment) -> io::Error;
}

/// `execve(2)` through [`std::os::unix::process::CommandExt::exec`].
#[derive(Debug, Default)]
pub struct Exec;

impl ProcessImage for Exec {
    fn replace(&self, program: &Path, argv: &[String], env: &ChildEnvironment) -> io::Error {
        use std::os::unix::process::CommandExt;

        let mut command = std::process::Command::new(program);
        if let Some((arg0, args)) = argv.split_first() {
            command.arg0(arg0).args(args);
        }
        command.env_clear().envs(env.iter_os()).exec()
    }
}

/// Locate `command` on the child's `PATH`.
///
/// Falls back to the parent's `PATH` when the child has none. Names that
/// contain a `/` are resolved against the working directory.
///
/// # Errors
///
/// Returns `Error::CommandNotFound` if no executable matches.
pub fn resolve(command: &str, env: &ChildEnvironment) -> Result<PathBuf> {
    let search: Option<OsString> = env
        .get_os(constants::PATH)
        .map(OsString::from)
        .or_else(|| std::env::var_os(constants::PATH));

    let not_found = |reason: &dyn std::fmt::Display| {
        debug!(command, error = %reason, "command lookup failed");
        Error::CommandNotFound(command.to_string())
    };

    // Only relative paths need the working directory, which may be gone.
    let relative = command.contains('/') && !Path::new(command).is_absolute();
    let cwd = match std::env::current_dir() {
        Ok(cwd) => cwd,
        Err(e) if relative => return Err(not_found(&e)),
        Err(_) => PathBuf::from("/"),
    };

    which::which_in(command, search, cwd).map_err(|e| not_found(&e))
}

/// Resolve `argv[0]` and replace the process with it.
///
/// Returns only on failure, with the error to report.
pub fn launch<I: ProcessImage + ?Sized>(
    image: &I,
    argv: &[String],
    env: &ChildEnvironment,
) -> Error {
    let Some(command) = argv.first() else {
        return Error::Usage("no command specified".to_string());
    };
    let program = match resolve(command, env) {
        Ok(program) => program,
        Err(e) => return e,
    };

    debug!(program = %program.display(), args = argv.len() - 1, vars = env.len(), "exec");
    let source = image.replace(&program, argv, env);
    Error::Exec {
        program: program.display().to_string(),
        source,
    }
}
