//! Command helper methods for Test.

use super::Test;
use assert_cmd::Command;
use std::process::Output;

/// Host variables that would point the binary at real AWS configuration.
const AWS_VARS: &[&str] = &[
    "AWS_ACCESS_KEY_ID",
    "AWS_SECRET_ACCESS_KEY",
    "AWS_SESSION_TOKEN",
    "AWS_PROFILE",
    "AWS_REGION",
    "AWS_DEFAULT_REGION",
    "AWS_ROLE_ARN",
    "AWS_WEB_IDENTITY_TOKEN_FILE",
    "AWS_CONTAINER_CREDENTIALS_RELATIVE_URI",
    "AWS_CONTAINER_CREDENTIALS_FULL_URI",
];

impl Test {
    /// Create a shush command with a scrubbed environment.
    pub fn cmd(&self) -> Command {
        #[allow(deprecated)]
        let mut cmd = Command::cargo_bin("shush").expect("failed to find shush binary");
        cmd.env("HOME", self.home.path())
            .env("AWS_CONFIG_FILE", self.home.path().join("aws-config"))
            .env(
                "AWS_SHARED_CREDENTIALS_FILE",
                self.home.path().join("aws-credentials"),
            )
            .env("AWS_EC2_METADATA_DISABLED", "true")
            .env("NO_COLOR", "1")
            .env_remove("KMS_ENCRYPTION_CONTEXT")
            .env_remove("SHUSH_LOG");
        for var in AWS_VARS {
            cmd.env_remove(var);
        }
        for (name, _) in std::env::vars_os() {
            let secret = name
                .to_str()
                .is_some_and(|n| n.starts_with("KMS_ENCRYPTED_") || n.starts_with("SSM_PS_"));
            if secret {
                cmd.env_remove(&name);
            }
        }
        cmd
    }

    /// Like [`Test::cmd`], with a region and dummy static credentials.
    ///
    /// Enough for the SDK to build clients; any real request fails.
    pub fn cmd_with_region(&self) -> Command {
        let mut cmd = self.cmd();
        cmd.env("AWS_ACCESS_KEY_ID", "AKIDEXAMPLE")
            .env("AWS_SECRET_ACCESS_KEY", "wJalrXUtnFEMI/K7MDENG+bPxRfiCYEXAMPLEKEY")
            .args(["--region", "us-east-1"]);
        cmd
    }

    /// Shortcut for `shush exec -- <command>`.
    pub fn exec(&self, command: &[&str]) -> Output {
        self.cmd()
            .arg("exec")
            .arg("--")
            .args(command)
            .output()
            .expect("failed to run shush exec")
    }
}
