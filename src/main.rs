//! Shush - KMS and SSM Parameter Store secrets for process environments.

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use shush::cli::output;
use shush::cli::{execute, Cli};
use shush::core::constants::{exit, LOG_ENV};

fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            // --help and --version are not failures
            let code = if e.use_stderr() { exit::USAGE } else { 0 };
            let _ = e.print();
            std::process::exit(code);
        }
    };

    // Initialize tracing subscriber with env-filter support
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| {
        if cli.global.verbose {
            EnvFilter::new("shush=debug")
        } else {
            EnvFilter::new("shush=warn")
        }
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .without_time()
                .with_writer(std::io::stderr),
        )
        .init();

    // exec only comes back here on failure
    if let Err(e) = execute(cli.command, &cli.global) {
        output::error(&e.to_string());
        std::process::exit(e.exit_code());
    }
}
