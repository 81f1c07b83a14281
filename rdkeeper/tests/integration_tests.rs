//! Integration tests for the rdkeeper binary
//!
//! These run the compiled binary in `--dry-run` / `--show-config` mode so
//! the full configuration, routing and command-construction path is
//! exercised end-to-end without spawning a client.

use std::process::{Command, Output};

/// Environment variables the binary reads; cleared so ambient state
/// cannot leak into the tests
const CONFIG_VARS: &[&str] = &[
    "REMOTE_VPN_TYPE",
    "REMOTE_CLIENT_TYPE",
    "HOST_IP",
    "HOST_PORT",
    "REMOTE_USERNAME",
    "REMOTE_PASSWORD",
    "RDP_PARAMS",
    "RDP_FILE",
    "AVD_ACCESS_TOKEN",
];

/// Helper to run the binary with given arguments
fn run_cli(args: &[&str]) -> Output {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_rdkeeper"));
    for var in CONFIG_VARS {
        cmd.env_remove(var);
    }
    cmd.args(args).output().expect("Failed to execute rdkeeper")
}

fn stdout_str(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}

fn stderr_str(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).to_string()
}

const BASE_RDP: &[&str] = &[
    "--vpn-type",
    "direct",
    "--client-type",
    "rdp",
    "--host",
    "10.0.0.5",
    "--port",
    "3389",
    "--username",
    "admin",
    "--password",
    "hunter2",
];

#[test]
fn test_help() {
    let output = run_cli(&["--help"]);
    assert!(output.status.success());
    let stdout = stdout_str(&output);
    assert!(stdout.contains("rdkeeper"));
    assert!(stdout.contains("--vpn-type"));
    assert!(stdout.contains("--client-type"));
}

#[test]
fn test_dry_run_standard_rdp_defaults() {
    let mut args = BASE_RDP.to_vec();
    args.push("--dry-run");
    let output = run_cli(&args);
    assert!(output.status.success(), "stderr: {}", stderr_str(&output));

    let stdout = stdout_str(&output);
    assert!(stdout.starts_with("xfreerdp"));
    assert!(stdout.contains("/u:admin"));
    assert!(stdout.contains("/v:10.0.0.5:3389"));
    // No extras configured: the four defaults apply
    for flag in ["/f", "+auto-reconnect", "+clipboard", "/cert:ignore"] {
        assert!(stdout.contains(flag), "missing default {flag}");
    }
    // The password travels over stdin, never the command line
    assert!(!stdout.contains("hunter2"));
}

#[test]
fn test_dry_run_extras_replace_defaults() {
    let mut args = BASE_RDP.to_vec();
    args.extend(["--rdp-params", "/w:1920 /h:1080", "--dry-run"]);
    let output = run_cli(&args);
    assert!(output.status.success());

    let stdout = stdout_str(&output);
    assert!(stdout.contains("/w:1920"));
    assert!(stdout.contains("/h:1080"));
    assert!(!stdout.contains("+clipboard"));
    assert!(!stdout.contains("+auto-reconnect"));
}

#[test]
fn test_dry_run_proxied_mode_wraps_invocation() {
    let output = run_cli(&[
        "--vpn-type",
        "tailscale",
        "--client-type",
        "rdp",
        "--host",
        "10.0.0.5",
        "--port",
        "3389",
        "--username",
        "admin",
        "--password",
        "hunter2",
        "--dry-run",
    ]);
    assert!(output.status.success());

    let stdout = stdout_str(&output);
    assert!(stdout.starts_with("proxychains4 -q xfreerdp"));
}

#[test]
fn test_dry_run_avd_with_token() {
    let mut args = BASE_RDP.to_vec();
    // "screen mode id:i:2\n" base64-encoded
    args.extend([
        "--rdp-file",
        "c2NyZWVuIG1vZGUgaWQ6aToyCg==",
        "--avd-access-token",
        "secret-token",
        "--dry-run",
    ]);
    let output = run_cli(&args);
    assert!(output.status.success(), "stderr: {}", stderr_str(&output));

    let stdout = stdout_str(&output);
    assert!(stdout.contains("/gt:arm"));
    assert!(stdout.contains("/network:auto"));
    // Token is masked in the rendered command and interactive auth is absent
    assert!(stdout.contains("/gat:****"));
    assert!(!stdout.contains("secret-token"));
    assert!(!stdout.contains("/sec:aad"));
}

#[test]
fn test_dry_run_avd_without_token_uses_interactive_auth() {
    let mut args = BASE_RDP.to_vec();
    args.extend(["--rdp-file", "c2NyZWVuIG1vZGUgaWQ6aToyCg==", "--dry-run"]);
    let output = run_cli(&args);
    assert!(output.status.success());

    let stdout = stdout_str(&output);
    assert!(stdout.contains("/sec:aad"));
    assert!(!stdout.contains("/gat:"));
}

#[test]
fn test_malformed_avd_payload_is_fatal() {
    let mut args = BASE_RDP.to_vec();
    args.extend(["--rdp-file", "!!not-base64!!", "--dry-run"]);
    let output = run_cli(&args);
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr_str(&output).contains("descriptor"));
}

#[test]
fn test_teamviewer_is_fatal() {
    let output = run_cli(&[
        "--vpn-type",
        "direct",
        "--client-type",
        "teamviewer",
        "--host",
        "10.0.0.5",
        "--port",
        "3389",
        "--username",
        "admin",
        "--password",
        "pw",
    ]);
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr_str(&output).contains("not supported"));
}

#[test]
fn test_unknown_client_type_is_fatal() {
    let output = run_cli(&[
        "--vpn-type",
        "direct",
        "--client-type",
        "citrix",
        "--host",
        "10.0.0.5",
        "--port",
        "3389",
        "--username",
        "admin",
        "--password",
        "pw",
    ]);
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr_str(&output).contains("Unknown client type"));
}

#[test]
fn test_unknown_vpn_mode_is_fatal() {
    let output = run_cli(&[
        "--vpn-type",
        "pptp",
        "--client-type",
        "rdp",
        "--host",
        "10.0.0.5",
        "--port",
        "3389",
        "--username",
        "admin",
        "--password",
        "pw",
    ]);
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr_str(&output).contains("Unknown VPN mode"));
}

#[test]
fn test_show_config_redacts_password() {
    let mut args = BASE_RDP.to_vec();
    args.push("--show-config");
    let output = run_cli(&args);
    assert!(output.status.success());

    let stdout = stdout_str(&output);
    let summary: serde_json::Value = serde_json::from_str(&stdout).expect("valid JSON summary");
    assert_eq!(summary["host"], "10.0.0.5");
    assert_eq!(summary["password"], "****");
    assert!(!stdout.contains("hunter2"));
}
