//! CLI diagnostics.
//!
//! Everything goes to stderr: stdout carries command results (ciphertext,
//! plaintext) and must stay clean. Colors respect NO_COLOR.

use console::style;

/// Check if colored diagnostics are enabled.
fn colors_enabled() -> bool {
    std::env::var_os("NO_COLOR").is_none() && console::colors_enabled_stderr()
}

/// Print an error message (red).
///
/// Example: `✗ cannot find 'nope'`
pub fn error(msg: &str) {
    if colors_enabled() {
        eprintln!("{} {}", style("✗").for_stderr().red(), msg);
    } else {
        eprintln!("✗ {}", msg);
    }
}
