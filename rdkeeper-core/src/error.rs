//! Error types for rdkeeper
//!
//! Errors are split by concern: [`ConfigError`] covers session configuration
//! that can never produce a working session, [`CommandError`] covers failures
//! while constructing a client invocation or its on-disk artifacts. Both are
//! fatal: they abort the process before the retry loop starts. Everything
//! that happens inside the loop is either advisory (logged and ignored) or
//! recovered by the next retry, so no error type exists for it.

use std::path::PathBuf;
use thiserror::Error;

/// Fatal session-configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// VPN mode outside the closed set
    #[error("Unknown VPN mode '{0}' (expected direct, openvpn, wireguard or tailscale)")]
    UnknownVpnMode(String),

    /// Recognised but deliberately unsupported client type
    #[error("Client type '{0}' is not supported")]
    UnsupportedClientType(String),

    /// Client type outside the known set
    #[error("Unknown client type '{0}' (expected rdp or vnc)")]
    UnknownClientType(String),
}

/// Fatal errors while constructing a client invocation
#[derive(Debug, Error)]
pub enum CommandError {
    /// The AVD connection descriptor payload is not valid base64
    #[error("Invalid AVD connection descriptor payload: {0}")]
    InvalidAvdPayload(#[from] base64::DecodeError),

    /// The decoded AVD descriptor could not be written to disk
    #[error("Failed to write AVD connection descriptor: {0}")]
    DescriptorWrite(#[source] std::io::Error),

    /// No home directory to place the VNC password file in
    #[error("Cannot locate a home directory for the VNC password file")]
    NoHomeDirectory,

    /// The VNC password file could not be provisioned
    #[error("Failed to provision VNC password file at '{path}': {reason}")]
    PasswordFile {
        /// Target path of the password file
        path: PathBuf,
        /// What went wrong
        reason: String,
    },
}

/// Top-level error type aggregating all rdkeeper-core errors
#[derive(Debug, Error)]
pub enum RdkeeperError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Command construction error
    #[error("Command error: {0}")]
    Command(#[from] CommandError),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
