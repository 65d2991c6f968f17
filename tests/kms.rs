//! Tests for the single-value commands: `encrypt`, `decrypt`, `ssm`.
//!
//! Only failures that happen before a remote call are exercised here; the
//! real round trips live in `aws.rs`.

mod support;
use predicates::prelude::*;
use support::*;

#[test]
fn test_decrypt_malformed_ciphertext() {
    let t = Test::new();
    t.cmd_with_region()
        .args(["decrypt", "not base64!!!"])
        .assert()
        .code(69)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("invalid base64 ciphertext"));
}

#[test]
fn test_decrypt_reads_stdin() {
    let t = Test::new();
    t.cmd_with_region()
        .arg("decrypt")
        .write_stdin("%%%\n")
        .assert()
        .code(69)
        .stderr(predicate::str::contains("invalid base64 ciphertext"));
}

#[test]
fn test_decrypt_without_region() {
    let t = Test::new();
    t.cmd()
        .args(["decrypt", "AQID"])
        .assert()
        .code(64)
        .stderr(predicate::str::contains("--region"));
}

#[test]
fn test_encrypt_requires_key() {
    let t = Test::new();
    t.cmd().arg("encrypt").assert().code(64);
}

#[test]
fn test_encrypt_malformed_context() {
    let t = Test::new();
    t.cmd_with_region()
        .args(["--context", "app", "encrypt", "alias/app", "secret"])
        .assert()
        .code(64)
        .stderr(predicate::str::contains("NAME=VALUE"));
}

#[test]
fn test_ssm_get_without_region() {
    let t = Test::new();
    t.cmd()
        .args(["ssm", "get", "/app/db"])
        .assert()
        .code(64)
        .stderr(predicate::str::contains("please specify region"));
}

#[test]
fn test_completions() {
    let t = Test::new();
    t.cmd()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("shush"));
}
