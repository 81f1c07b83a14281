//! rdkeeper - Remote-desktop session supervisor
//!
//! Resolves the network-access mode, verifies DNS readiness where the
//! mode requires it, constructs the client invocation, and hands off to
//! the keep-alive loop. Configuration comes from the environment (or the
//! equivalent command-line flags); fatal configuration errors exit with a
//! non-zero code before anything is spawned.

mod cli;
mod error;

use clap::Parser;
use secrecy::SecretString;
use tracing_subscriber::EnvFilter;

use rdkeeper_core::config::SessionConfig;
use rdkeeper_core::routing::RoutePlan;
use rdkeeper_core::supervisor::{ProcessLauncher, Supervisor};
use rdkeeper_core::{dns, ClientKind, VpnMode};

use cli::Cli;
use error::CliError;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_target(false)
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {e}");
        std::process::exit(e.exit_code());
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    let config = build_session_config(&cli)?;

    if cli.show_config {
        println!("{}", serde_json::to_string_pretty(&config.summary())?);
        return Ok(());
    }

    let plan = RoutePlan::for_mode(config.vpn_mode);
    tracing::info!(
        vpn_mode = %config.vpn_mode,
        client = %config.client,
        proxied = plan.proxy.is_wrapped(),
        dns_probe = plan.dns_probe_required,
        "Session routing resolved"
    );

    // Fatal setup (AVD descriptor decode, VNC password file) happens here,
    // before any probe or spawn.
    let supervisor = Supervisor::prepare(config, plan)?;

    if cli.dry_run {
        println!("{}", supervisor.assemble_command().display_masked());
        return Ok(());
    }

    if plan.dns_probe_required {
        dns::wait_for_resolver_ready();
        let _ = dns::test_resolution(&supervisor.config().host);
        if let Some(ref params) = supervisor.config().extra_params {
            dns::test_load_balancer_resolution(params);
        }
    }

    let mut launcher = ProcessLauncher;
    supervisor.run(&mut launcher)
}

/// Builds the immutable session configuration from CLI/environment input.
///
/// Unknown VPN modes and unknown or unsupported client types are fatal
/// here — before any DNS probe or spawn attempt.
fn build_session_config(cli: &Cli) -> Result<SessionConfig, CliError> {
    let vpn_mode: VpnMode = cli.vpn_type.parse()?;
    let client: ClientKind = cli.client_type.parse()?;

    let mut config = SessionConfig::new(
        vpn_mode,
        client,
        cli.host.clone(),
        cli.port,
        cli.username.clone(),
        SecretString::from(cli.password.clone()),
    );
    if let Some(ref params) = cli.rdp_params {
        config = config.with_extra_params(params.clone());
    }
    if let Some(ref payload) = cli.rdp_file {
        config = config.with_avd_payload(payload.clone());
    }
    if let Some(ref token) = cli.avd_access_token {
        config = config.with_avd_access_token(SecretString::from(token.clone()));
    }
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_cli() -> Cli {
        Cli::parse_from([
            "rdkeeper",
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
            "pw",
        ])
    }

    #[test]
    fn test_build_session_config() {
        let config = build_session_config(&base_cli()).unwrap();
        assert_eq!(config.vpn_mode, VpnMode::Direct);
        assert_eq!(config.client, ClientKind::Rdp);
        assert_eq!(config.host, "10.0.0.5");
        assert!(!config.is_avd());
    }

    #[test]
    fn test_teamviewer_is_fatal_before_any_spawn() {
        let mut cli = base_cli();
        cli.client_type = "teamviewer".to_string();
        let err = build_session_config(&cli).unwrap_err();
        assert_eq!(err.exit_code(), error::exit_codes::GENERAL_ERROR);
    }

    #[test]
    fn test_unknown_client_is_fatal() {
        let mut cli = base_cli();
        cli.client_type = "x2go".to_string();
        assert!(build_session_config(&cli).is_err());
    }

    #[test]
    fn test_unknown_vpn_mode_is_fatal() {
        let mut cli = base_cli();
        cli.vpn_type = "pptp".to_string();
        assert!(build_session_config(&cli).is_err());
    }
}
