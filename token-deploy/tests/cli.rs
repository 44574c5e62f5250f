// Copyright 2025, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

use assert_cmd::Command;
use tempfile::TempDir;

/// Runs the CLI in an empty directory, with no credentials or endpoints in the environment.
fn token_deploy(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("token-deploy").unwrap();
    cmd.current_dir(dir.path())
        .env_remove("MY_PRIVATE_KEY")
        .env_remove("SEPOLIA_RPC_URL")
        .env_remove("DEPLOY_NETWORK");
    cmd
}

fn stderr(output: &std::process::Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

#[test]
fn help_lists_deploy() {
    let dir = TempDir::new().unwrap();
    let output = token_deploy(&dir).arg("--help").output().unwrap();
    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("deploy"));
}

#[test]
fn deploy_retries_endpoint_by_default() {
    let dir = TempDir::new().unwrap();
    let output = token_deploy(&dir).args(["deploy", "--help"]).output().unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    let line = stdout
        .lines()
        .skip_while(|line| !line.contains("--connect-retries"))
        .take(3)
        .collect::<Vec<_>>()
        .join(" ");
    assert!(line.contains("[default: 3]"), "{stdout}");
}

#[test]
fn missing_credential_fails_before_connecting() {
    let dir = TempDir::new().unwrap();
    let output = token_deploy(&dir)
        .args(["deploy", "--network", "localhost", "--endpoint", "http://127.0.0.1:1"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("private key"), "{}", stderr(&output));
}

#[test]
fn invalid_private_key_is_rejected() {
    let dir = TempDir::new().unwrap();
    let output = token_deploy(&dir)
        .args(["deploy", "--network", "localhost"])
        .env("MY_PRIVATE_KEY", "0x1234")
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("32 bytes"), "{}", stderr(&output));
}

#[test]
fn sepolia_needs_an_endpoint() {
    let dir = TempDir::new().unwrap();
    let output = token_deploy(&dir).arg("deploy").output().unwrap();
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("SEPOLIA_RPC_URL"), "{}", stderr(&output));
}

#[test]
fn unknown_network_is_reported() {
    let dir = TempDir::new().unwrap();
    let output = token_deploy(&dir)
        .args(["deploy", "--network", "mainnet"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("unknown network mainnet"));
}

#[test]
fn network_file_adds_networks() {
    let dir = TempDir::new().unwrap();
    std::fs::write(
        dir.path().join("deploy.toml"),
        "[networks.devnet]\nurl = \"http://127.0.0.1:8547\"\nchain_id = 412346\n",
    )
    .unwrap();
    let output = token_deploy(&dir).arg("networks").output().unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("devnet\thttp://127.0.0.1:8547\tchain id 412346"));
    assert!(stdout.contains("sepolia\t$SEPOLIA_RPC_URL"));
}
