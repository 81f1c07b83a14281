//! Session configuration model
//!
//! A [`SessionConfig`] is assembled once at process start from the
//! environment and stays immutable for the process lifetime. The VPN mode
//! and client type are closed enums: values outside the known sets are
//! rejected at parse time instead of being silently routed to a default
//! branch.

use std::fmt;
use std::str::FromStr;

use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;

use crate::error::ConfigError;

/// Network-access mode the session's traffic is routed through
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum VpnMode {
    /// Direct connectivity, no tunnel and no proxy
    Direct,
    /// OpenVPN tunnel interface; resolution relies on the tunnel's DNS
    OpenVpn,
    /// WireGuard tunnel reached through a SOCKS-style proxy chain
    WireGuard,
    /// Tailscale network reached through a SOCKS-style proxy chain
    Tailscale,
}

impl VpnMode {
    /// Returns the canonical lowercase name
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Direct => "direct",
            Self::OpenVpn => "openvpn",
            Self::WireGuard => "wireguard",
            Self::Tailscale => "tailscale",
        }
    }
}

impl FromStr for VpnMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "direct" => Ok(Self::Direct),
            "openvpn" => Ok(Self::OpenVpn),
            "wireguard" => Ok(Self::WireGuard),
            "tailscale" => Ok(Self::Tailscale),
            _ => Err(ConfigError::UnknownVpnMode(s.to_string())),
        }
    }
}

impl fmt::Display for VpnMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Remote-desktop client backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ClientKind {
    /// FreeRDP-based RDP client (standard or AVD gateway-brokered)
    Rdp,
    /// VNC viewer client
    Vnc,
}

impl ClientKind {
    /// Returns the canonical lowercase name
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Rdp => "rdp",
            Self::Vnc => "vnc",
        }
    }
}

impl FromStr for ClientKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "rdp" => Ok(Self::Rdp),
            "vnc" => Ok(Self::Vnc),
            // Recognised in the wild but never spawned
            "teamviewer" => Err(ConfigError::UnsupportedClientType(s.to_string())),
            _ => Err(ConfigError::UnknownClientType(s.to_string())),
        }
    }
}

impl fmt::Display for ClientKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Immutable per-session configuration
///
/// Credentials are held as [`SecretString`] and only exposed at the spawn
/// boundary; they never appear in logs or config summaries.
pub struct SessionConfig {
    /// Network-access mode
    pub vpn_mode: VpnMode,
    /// Client backend
    pub client: ClientKind,
    /// Target hostname or IP address
    pub host: String,
    /// Target port
    pub port: u16,
    /// Username for authentication
    pub username: String,
    /// Password for authentication
    pub password: SecretString,
    /// Freeform extra client parameters (shell-quoted, tokenized internally)
    pub extra_params: Option<String>,
    /// Base64-encoded AVD connection descriptor; presence selects the AVD branch
    pub avd_payload: Option<String>,
    /// Bearer token for AVD gateway authentication
    pub avd_access_token: Option<SecretString>,
}

impl SessionConfig {
    /// Creates a session configuration with the required fields
    #[must_use]
    pub fn new(
        vpn_mode: VpnMode,
        client: ClientKind,
        host: impl Into<String>,
        port: u16,
        username: impl Into<String>,
        password: SecretString,
    ) -> Self {
        Self {
            vpn_mode,
            client,
            host: host.into(),
            port,
            username: username.into(),
            password,
            extra_params: None,
            avd_payload: None,
            avd_access_token: None,
        }
    }

    /// Sets the freeform extra client parameters
    #[must_use]
    pub fn with_extra_params(mut self, params: impl Into<String>) -> Self {
        self.extra_params = Some(params.into());
        self
    }

    /// Sets the base64-encoded AVD connection descriptor
    #[must_use]
    pub fn with_avd_payload(mut self, payload: impl Into<String>) -> Self {
        self.avd_payload = Some(payload.into());
        self
    }

    /// Sets the AVD gateway access token
    #[must_use]
    pub fn with_avd_access_token(mut self, token: SecretString) -> Self {
        self.avd_access_token = Some(token);
        self
    }

    /// Whether the AVD gateway-brokered RDP branch applies
    #[must_use]
    pub fn is_avd(&self) -> bool {
        matches!(self.client, ClientKind::Rdp) && self.avd_payload.is_some()
    }

    /// Returns a JSON summary with all secrets redacted
    #[must_use]
    pub fn summary(&self) -> serde_json::Value {
        serde_json::json!({
            "vpn_mode": self.vpn_mode,
            "client": self.client,
            "host": self.host,
            "port": self.port,
            "username": self.username,
            "password": "****",
            "extra_params": self.extra_params,
            "avd_payload_present": self.avd_payload.is_some(),
            "avd_access_token": self.avd_access_token.as_ref().map(|_| "****"),
        })
    }

    /// Whether a non-empty password was supplied
    #[must_use]
    pub fn has_password(&self) -> bool {
        !self.password.expose_secret().is_empty()
    }
}

impl fmt::Debug for SessionConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionConfig")
            .field("vpn_mode", &self.vpn_mode)
            .field("client", &self.client)
            .field("host", &self.host)
            .field("port", &self.port)
            .field("username", &self.username)
            .field("password", &"****")
            .field("extra_params", &self.extra_params)
            .field("avd_payload_present", &self.avd_payload.is_some())
            .field("avd_access_token_present", &self.avd_access_token.is_some())
            .finish()
    }
}
