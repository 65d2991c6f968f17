//! Constants used throughout shush.
//!
//! Centralizes naming conventions and exit codes.

/// Default prefix for KMS encrypted environment variables.
pub const KMS_PREFIX: &str = "KMS_ENCRYPTED_";

/// Prefix for SSM Parameter Store backed environment variables.
pub const SSM_PREFIX: &str = "SSM_PS_";

/// Environment fallback for `--context`, comma separated.
pub const CONTEXT_ENV: &str = "KMS_ENCRYPTION_CONTEXT";

/// Environment variable controlling the log filter.
pub const LOG_ENV: &str = "SHUSH_LOG";

pub const HOME: &str = "HOME";

pub const PATH: &str = "PATH";

/// Passwd database consulted when dropping privileges.
pub const PASSWD_FILE: &str = "/etc/passwd";

/// Group database consulted when dropping privileges.
pub const GROUP_FILE: &str = "/etc/group";

/// Process exit codes (sysexits.h style, plus the shell's 126/127).
pub mod exit {
    /// Incorrect usage of shush.
    pub const USAGE: i32 = 64;
    /// KMS encrypt/decrypt issues.
    pub const KMS: i32 = 69;
    /// SSM Parameter Store issues.
    pub const SSM: i32 = 70;
    /// Cannot execute the specified command.
    pub const EXEC: i32 = 126;
    /// Cannot find the specified command.
    pub const COMMAND_NOT_FOUND: i32 = 127;
}
