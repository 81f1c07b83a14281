//! Command-line interface definition
//!
//! Every argument is backed by the environment variable the session
//! container sets, so a bare `rdkeeper` invocation picks the whole
//! configuration up from the environment.

use clap::Parser;

/// Remote-desktop session supervisor
///
/// Launches an RDP or VNC client against the configured target, routes
/// its traffic according to the VPN mode, and relaunches it on every
/// exit until the process is terminated.
#[derive(Parser, Debug)]
#[command(name = "rdkeeper", version, about)]
pub struct Cli {
    /// VPN mode routing the session's traffic
    /// (direct, openvpn, wireguard, tailscale)
    #[arg(long, env = "REMOTE_VPN_TYPE")]
    pub vpn_type: String,

    /// Client backend (rdp or vnc)
    #[arg(long, env = "REMOTE_CLIENT_TYPE")]
    pub client_type: String,

    /// Target hostname or IP address
    #[arg(long, env = "HOST_IP")]
    pub host: String,

    /// Target port
    #[arg(long, env = "HOST_PORT")]
    pub port: u16,

    /// Username for authentication
    #[arg(long, env = "REMOTE_USERNAME")]
    pub username: String,

    /// Password for authentication
    #[arg(long, env = "REMOTE_PASSWORD", hide_env_values = true)]
    pub password: String,

    /// Freeform extra client parameters (shell-quoted)
    #[arg(long, env = "RDP_PARAMS")]
    pub rdp_params: Option<String>,

    /// Base64-encoded AVD connection descriptor; presence selects the
    /// AVD gateway-brokered branch
    #[arg(long, env = "RDP_FILE", hide_env_values = true)]
    pub rdp_file: Option<String>,

    /// Bearer token for AVD gateway authentication
    #[arg(long, env = "AVD_ACCESS_TOKEN", hide_env_values = true)]
    pub avd_access_token: Option<String>,

    /// Print the constructed client command (masked) and exit
    #[arg(long)]
    pub dry_run: bool,

    /// Print a redacted configuration summary and exit
    #[arg(long)]
    pub show_config: bool,
}
