//! Error types.
//!
//! Every error aborts the invocation. Each variant maps to one process exit
//! code, see [`Error::exit_code`].

use std::io;

use thiserror::Error;

use crate::core::constants::exit;
use crate::core::privilege::LookupError;
use crate::core::types::Backend;

/// Top-level error for shush operations.
#[derive(Error, Debug)]
pub enum Error {
    /// Bad invocation: missing command, malformed context, bad prefix.
    #[error("{0}")]
    Usage(String),

    /// A secret backend call failed outside of environment decryption.
    #[error(transparent)]
    Backend(#[from] BackendError),

    /// A secret backend failed while decrypting an environment variable.
    #[error("cannot decrypt ${name}: {source}")]
    Secret {
        name: String,
        #[source]
        source: BackendError,
    },

    /// The target user could not be resolved.
    #[error("failed switching user to {user:?}: {source}")]
    UserResolution {
        user: String,
        #[source]
        source: LookupError,
    },

    /// A credential change was refused by the OS.
    #[error("failed switching user to {user:?}: {step}: {source}")]
    Privilege {
        user: String,
        step: &'static str,
        #[source]
        source: io::Error,
    },

    #[error("cannot find '{0}'")]
    CommandNotFound(String),

    /// Replacing the process image failed.
    #[error("cannot execute '{program}': {source}")]
    Exec {
        program: String,
        #[source]
        source: io::Error,
    },

    #[error("io error: {0}")]
    Io(#[from] io::Error),
}

impl Error {
    /// Process exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Usage(_) | Self::Io(_) => exit::USAGE,
            Self::Backend(e) | Self::Secret { source: e, .. } => e.backend.exit_code(),
            Self::UserResolution { .. } | Self::Privilege { .. } | Self::Exec { .. } => {
                exit::EXEC
            }
            Self::CommandNotFound(_) => exit::COMMAND_NOT_FOUND,
        }
    }
}

/// Failure reported by (or on the way to) a secret backend.
#[derive(Error, Debug)]
#[error("{backend}: {kind}")]
pub struct BackendError {
    pub backend: Backend,
    pub kind: BackendErrorKind,
}

impl BackendError {
    pub fn new(backend: Backend, kind: BackendErrorKind) -> Self {
        Self { backend, kind }
    }

    /// Remote call failure with the SDK's rendered message.
    pub fn request(backend: Backend, message: impl Into<String>) -> Self {
        Self::new(backend, BackendErrorKind::Request(message.into()))
    }
}

#[derive(Error, Debug)]
pub enum BackendErrorKind {
    #[error("invalid base64 ciphertext: {0}")]
    Decode(#[from] base64::DecodeError),

    #[error("{0}")]
    Request(String),

    #[error("response contained no {0}")]
    MissingOutput(&'static str),

    #[error("plaintext is not valid UTF-8")]
    NotUtf8,

    #[error("no provider registered")]
    Unregistered,
}

pub type Result<T> = std::result::Result<T, Error>;
