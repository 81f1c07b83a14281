//! rdkeeper core library
//!
//! This crate provides the core functionality for the rdkeeper
//! remote-desktop session supervisor: it resolves how session traffic is
//! routed from the configured VPN mode, verifies DNS readiness where the
//! mode requires it, tokenizes freeform client parameters, constructs the
//! argument vector for the chosen client backend, and keeps the session
//! alive by relaunching the external client on every exit.
//!
//! # Crate Structure
//!
//! - [`config`] - Session configuration (VPN mode, client kind, target, credentials)
//! - [`routing`] - Network-mode resolution (proxy wrapper, DNS probing requirement)
//! - [`dns`] - DNS readiness probing and resolution tests
//! - [`params`] - Quote-aware extra-parameter tokenization
//! - [`protocol`] - Client command builders (standard RDP, AVD RDP, VNC)
//! - [`supervisor`] - Keep-alive retry loop around the external client
//! - [`error`] - Error types

#![warn(missing_docs)]

pub mod config;
pub mod dns;
pub mod error;
pub mod params;
pub mod protocol;
pub mod routing;
pub mod supervisor;

pub use config::{ClientKind, SessionConfig, VpnMode};
pub use dns::{test_load_balancer_resolution, test_resolution, wait_for_resolver_ready};
pub use error::{CommandError, ConfigError, RdkeeperError};
pub use params::{extract_load_balancer_host, parse_extra_params};
pub use protocol::{
    AvdDescriptor, ClientCommand, RDP_PROGRAM, STANDARD_RDP_DEFAULT_ARGS, VNC_PROGRAM,
    VncPasswordFile, build_avd_command, build_standard_rdp_command, build_vnc_command,
};
pub use routing::{ProxyDirective, RoutePlan};
pub use supervisor::{
    Launcher, ProcessLauncher, RDP_RETRY_DELAY, Supervisor, VNC_RETRY_DELAY, backoff_for,
};
