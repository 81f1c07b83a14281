//! Azure Virtual Desktop command builder
//!
//! AVD sessions are driven by a connection-descriptor file rather than a
//! raw host and port: the base64 payload from the environment is decoded
//! into a temporary `.rdp` artifact whose path must be the first
//! positional argument. Gateway authentication uses either a bearer token
//! or the client's interactive Azure AD flow.

use std::io::Write;
use std::path::Path;

use base64::{Engine, engine::general_purpose::STANDARD as B64};
use secrecy::ExposeSecret;
use tempfile::NamedTempFile;

use crate::config::SessionConfig;
use crate::error::CommandError;

use super::{ClientCommand, freerdp::RDP_PROGRAM};

/// Decoded AVD connection descriptor, held for the process lifetime
///
/// Dropping the descriptor removes the temporary file, so the supervisor
/// keeps it alive for as long as the session can be relaunched.
#[derive(Debug)]
pub struct AvdDescriptor {
    file: NamedTempFile,
}

impl AvdDescriptor {
    /// Decodes a base64 payload into a temporary `.rdp` descriptor file.
    ///
    /// # Errors
    ///
    /// Malformed base64 and descriptor write failures are fatal: they
    /// abort the session before the retry loop starts.
    pub fn decode(payload: &str) -> Result<Self, CommandError> {
        let bytes = B64.decode(payload.trim())?;
        let mut file = tempfile::Builder::new()
            .prefix("rdkeeper-avd-")
            .suffix(".rdp")
            .tempfile()
            .map_err(CommandError::DescriptorWrite)?;
        file.write_all(&bytes).map_err(CommandError::DescriptorWrite)?;
        file.flush().map_err(CommandError::DescriptorWrite)?;
        tracing::debug!(path = %file.path().display(), "AVD connection descriptor written");
        Ok(Self { file })
    }

    /// Path of the descriptor file
    #[must_use]
    pub fn path(&self) -> &Path {
        self.file.path()
    }
}

/// Builds the AVD gateway-brokered RDP invocation.
///
/// The descriptor path is the first positional argument, followed by
/// automatic network selection, certificate-ignore and the ARM gateway
/// type. Exactly one authentication mode is present: `/gat:<token>` when
/// an access token was configured, or `/sec:aad` (interactive Azure AD)
/// otherwise — the latter blocks headless operation, so it is logged as a
/// warning. Credentials are appended when provided, and parsed extra
/// parameters come last so they can override anything before them.
#[must_use]
pub fn build_avd_command(
    config: &SessionConfig,
    descriptor: &AvdDescriptor,
    extras: &[String],
) -> ClientCommand {
    let mut args = vec![
        descriptor.path().display().to_string(),
        "/network:auto".to_string(),
        "/cert:ignore".to_string(),
        "/gt:arm".to_string(),
    ];

    match &config.avd_access_token {
        Some(token) => args.push(format!("/gat:{}", token.expose_secret())),
        None => {
            tracing::warn!(
                "No AVD access token configured; interactive Azure AD authentication \
                 will block headless operation"
            );
            args.push("/sec:aad".to_string());
        }
    }

    let mut command = ClientCommand::new(RDP_PROGRAM, args);
    if !config.username.is_empty() {
        command.args.push(format!("/u:{}", config.username));
    }
    if config.has_password() {
        command.args.push("/from-stdin".to_string());
        command = command.with_stdin_secret(config.password.clone());
    }

    command.args.extend(extras.iter().cloned());
    command
}
