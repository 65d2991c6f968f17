//! Shush - KMS and SSM Parameter Store secrets for process environments.
//!
//! # Architecture
//!
//! ```text
//! src/
//! ├── cli/              # Command-line interface
//! │   ├── exec          # Decrypt environment, drop privileges, exec
//! │   ├── kms           # encrypt / decrypt
//! │   ├── ssm           # ssm put / ssm get
//! │   ├── payload       # Argument-or-stdin input
//! │   ├── output        # Diagnostics
//! │   └── completions   # Shell completions
//! └── core/             # Core library components
//!     ├── prefix        # Variable name -> backend classification
//!     ├── context       # KMS encryption context
//!     ├── provider/     # Secret providers
//!     │   ├── mod       # SecretProvider trait and registry
//!     │   ├── aws       # SDK session (runtime + config)
//!     │   ├── kms       # AWS KMS
//!     │   └── ssm       # AWS SSM Parameter Store
//!     ├── driver        # Environment decryption
//!     ├── env           # Staged child environments
//!     ├── privilege/    # User resolution and credential changes
//!     └── launch        # Command lookup and exec
//! ```
//!
//! # Environment convention
//!
//! - `KMS_ENCRYPTED_<NAME>=<base64 ciphertext>` is exported as `<NAME>`
//! - `SSM_PS_<NAME>=<parameter name>` is exported as `<NAME>`

pub mod cli;
pub mod core;
pub mod error;
