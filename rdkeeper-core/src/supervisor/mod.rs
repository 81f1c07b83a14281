//! Session supervision
//!
//! The supervisor owns the keep-alive loop:
//! Idle → Connecting → (Active | Failed) → Backoff → Connecting → …
//! with no terminal state other than external termination. Every cycle
//! rebuilds the argument vector, prepends the proxy wrapper when the
//! routing plan requires one, spawns the client, blocks until it exits,
//! and sleeps a fixed per-client backoff. Exit status is logged but never
//! inspected for the retry decision: clean disconnects and crashes are
//! treated identically.

mod diagnostics;
mod keyboard;
mod launcher;

pub use launcher::{Launcher, ProcessLauncher};

use std::time::Duration;

use crate::config::{ClientKind, SessionConfig, VpnMode};
use crate::error::CommandError;
use crate::params::parse_extra_params;
use crate::protocol::{
    AvdDescriptor, ClientCommand, VncPasswordFile, build_avd_command, build_standard_rdp_command,
    build_vnc_command,
};
use crate::routing::RoutePlan;

/// Delay between RDP connection attempts
pub const RDP_RETRY_DELAY: Duration = Duration::from_secs(3);

/// Delay between VNC connection attempts (observed constant differs from
/// the RDP one; both are kept rather than unified)
pub const VNC_RETRY_DELAY: Duration = Duration::from_secs(5);

/// Per-branch artifacts prepared once, before the loop
enum SessionBackend {
    /// Standard RDP; no on-disk artifacts
    StandardRdp,
    /// AVD gateway-brokered RDP; descriptor lives for the process lifetime
    AvdRdp(AvdDescriptor),
    /// VNC; password file provisioned once per supervisor start
    Vnc(VncPasswordFile),
}

/// Supervises one remote-desktop session, relaunching the client forever
pub struct Supervisor {
    config: SessionConfig,
    plan: RoutePlan,
    backend: SessionBackend,
    backoff: Duration,
}

impl Supervisor {
    /// Prepares a supervisor: selects the backend branch from the client
    /// kind and AVD payload presence, and provisions its artifacts.
    ///
    /// # Errors
    ///
    /// A malformed AVD payload or a failed VNC password-file provisioning
    /// is fatal — reported before any connection attempt is made.
    pub fn prepare(config: SessionConfig, plan: RoutePlan) -> Result<Self, CommandError> {
        let backend = match (config.client, config.avd_payload.as_deref()) {
            (ClientKind::Rdp, Some(payload)) => SessionBackend::AvdRdp(AvdDescriptor::decode(payload)?),
            (ClientKind::Rdp, None) => SessionBackend::StandardRdp,
            (ClientKind::Vnc, _) => SessionBackend::Vnc(VncPasswordFile::provision(&config.password)?),
        };
        let backoff = backoff_for(config.client);
        Ok(Self {
            config,
            plan,
            backend,
            backoff,
        })
    }

    /// Session configuration
    #[must_use]
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Delay applied between connection attempts
    #[must_use]
    pub fn backoff(&self) -> Duration {
        self.backoff
    }

    /// Overrides the backoff delay (tests shorten the wait)
    #[must_use]
    pub fn with_backoff(mut self, backoff: Duration) -> Self {
        self.backoff = backoff;
        self
    }

    /// Builds the client command for the prepared backend, fresh
    #[must_use]
    pub fn build_command(&self) -> ClientCommand {
        let extras = self
            .config
            .extra_params
            .as_deref()
            .map(parse_extra_params)
            .unwrap_or_default();

        match &self.backend {
            SessionBackend::StandardRdp => build_standard_rdp_command(&self.config, &extras),
            SessionBackend::AvdRdp(descriptor) => {
                build_avd_command(&self.config, descriptor, &extras)
            }
            SessionBackend::Vnc(passwd) => build_vnc_command(&self.config, passwd.path()),
        }
    }

    /// Builds the command and applies the proxy wrapper prefix
    #[must_use]
    pub fn assemble_command(&self) -> ClientCommand {
        let command = self.build_command();
        let prefix = self.plan.proxy.command_prefix();
        let Some((wrapper, wrapper_args)) = prefix.split_first() else {
            return command;
        };

        let mut args: Vec<String> = wrapper_args.iter().map(|s| (*s).to_string()).collect();
        args.push(command.program);
        args.extend(command.args);
        ClientCommand {
            program: (*wrapper).to_string(),
            args,
            stdin_secret: command.stdin_secret,
        }
    }

    /// Runs the keep-alive loop. Never returns; the only exit is
    /// termination of the supervising process itself.
    pub fn run(&self, launcher: &mut dyn Launcher) -> ! {
        if matches!(self.config.client, ClientKind::Rdp) {
            keyboard::configure_layout();
        }

        loop {
            if matches!(self.config.client, ClientKind::Rdp)
                && matches!(self.config.vpn_mode, VpnMode::OpenVpn)
            {
                diagnostics::log_route_and_dns();
            }

            let command = self.assemble_command();
            tracing::info!(command = %command.display_masked(), "Launching client");

            match launcher.launch(&command) {
                Ok(status) => tracing::info!(%status, "Client exited"),
                Err(e) => tracing::warn!(error = %e, "Client failed to launch"),
            }

            tracing::info!(delay = ?self.backoff, "Reconnecting after backoff");
            std::thread::sleep(self.backoff);
        }
    }
}

/// Fixed backoff constant for a client kind
#[must_use]
pub const fn backoff_for(client: ClientKind) -> Duration {
    match client {
        ClientKind::Rdp => RDP_RETRY_DELAY,
        ClientKind::Vnc => VNC_RETRY_DELAY,
    }
}
