//! Command-line interface.

pub mod completions;
pub mod exec;
pub mod kms;
pub mod output;
pub mod payload;
pub mod ssm;

use clap::{Parser, Subcommand};

use crate::core::constants;
use crate::core::context::DecryptionContext;
use crate::error::Result;

/// Shush - KMS and SSM Parameter Store secrets for process environments.
#[derive(Parser, Debug)]
#[command(
    name = "shush",
    about = "Encrypt and decrypt secrets with AWS KMS and SSM Parameter Store",
    version
)]
pub struct Cli {
    #[command(flatten)]
    pub global: Global,

    #[command(subcommand)]
    pub command: Command,
}

/// Options shared by every command.
#[derive(clap::Args, Debug, Clone, Default)]
pub struct Global {
    /// AWS region
    #[arg(long, global = true, env = "AWS_DEFAULT_REGION")]
    pub region: Option<String>,

    /// KMS encryption context as NAME=VALUE (repeatable)
    /// [env: KMS_ENCRYPTION_CONTEXT, comma separated]
    #[arg(short = 'C', long = "context", global = true)]
    pub context: Vec<String>,

    /// Show debug output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

impl Global {
    /// Encryption context from `--context`, or from the environment when no
    /// flag was given.
    ///
    /// Only the environment form is split on commas; a flag value is one
    /// `NAME=VALUE` pair even if the value contains a comma.
    pub fn decryption_context(&self) -> Result<DecryptionContext> {
        if !self.context.is_empty() {
            return DecryptionContext::parse(&self.context);
        }
        match std::env::var(constants::CONTEXT_ENV) {
            Ok(list) => DecryptionContext::parse_list(&list),
            Err(_) => Ok(DecryptionContext::default()),
        }
    }
}

/// Top-level commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Encrypt with a KMS key
    Encrypt {
        /// KMS key id, ARN, or alias
        key: String,
        /// Plaintext (read from stdin when omitted)
        plaintext: Option<String>,
    },

    /// Decrypt KMS ciphertext
    Decrypt {
        /// Print the ARN of the key used instead of the plaintext
        #[arg(long)]
        print_key: bool,
        /// Base64 ciphertext (read from stdin when omitted)
        ciphertext: Option<String>,
    },

    /// Execute a command with decrypted secrets in its environment
    Exec {
        /// Prefix of KMS encrypted environment variables
        #[arg(long, default_value = constants::KMS_PREFIX)]
        prefix: String,
        /// Exec the command as the given user (name or uid)
        #[arg(long)]
        user: Option<String>,
        /// Command and arguments to exec
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        command: Vec<String>,
    },

    /// Manage SSM Parameter Store parameters
    Ssm {
        #[command(subcommand)]
        action: SsmAction,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

/// SSM subcommands.
#[derive(Subcommand, Debug)]
pub enum SsmAction {
    /// Store a parameter, overwriting any existing value
    Put {
        /// Parameter name
        name: String,
        /// Parameter value (read from stdin when omitted)
        value: Option<String>,
        /// Store as SecureString encrypted with this KMS key
        #[arg(long)]
        kms: Option<String>,
    },

    /// Print a decrypted parameter value
    Get {
        /// Parameter name (read from stdin when omitted)
        name: Option<String>,
    },
}

/// Execute a command.
///
/// `exec` only returns on failure.
pub fn execute(command: Command, global: &Global) -> Result<()> {
    use Command::*;

    match command {
        Encrypt { key, plaintext } => kms::encrypt(global, &key, plaintext),
        Decrypt {
            print_key,
            ciphertext,
        } => kms::decrypt(global, ciphertext, print_key),
        Exec {
            prefix,
            user,
            command,
        } => Err(exec::execute(global, &prefix, user.as_deref(), &command)),
        Ssm { action } => match action {
            SsmAction::Put { name, value, kms } => ssm::put(global, &name, value, kms.as_deref()),
            SsmAction::Get { name } => ssm::get(global, name),
        },
        Completions { shell } => completions::execute(shell),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_definition() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_exec_collects_trailing_args() {
        let cli = Cli::try_parse_from([
            "shush", "exec", "--user", "app", "--", "sh", "-c", "echo $X",
        ])
        .unwrap();
        match cli.command {
            Command::Exec {
                prefix,
                user,
                command,
            } => {
                assert_eq!(prefix, "KMS_ENCRYPTED_");
                assert_eq!(user.as_deref(), Some("app"));
                assert_eq!(command, vec!["sh", "-c", "echo $X"]);
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_repeated_context() {
        let cli = Cli::try_parse_from([
            "shush", "-C", "a=b", "--context", "c=d", "exec", "true",
        ])
        .unwrap();
        assert_eq!(cli.global.context, vec!["a=b", "c=d"]);
    }

    #[test]
    fn test_context_flag_keeps_commas() {
        let cli = Cli::try_parse_from(["shush", "-C", "res=a,b", "exec", "true"]).unwrap();
        assert_eq!(cli.global.context, vec!["res=a,b"]);

        let context = cli.global.decryption_context().unwrap();
        assert_eq!(context.get("res"), Some("a,b"));
        assert_eq!(context.len(), 1);
    }
}
