//! CLI error types and exit codes.

use rdkeeper_core::error::{CommandError, ConfigError};

/// Exit codes for the supervisor binary
pub mod exit_codes {
    /// Fatal configuration or setup error — nothing was spawned
    pub const GENERAL_ERROR: i32 = 1;
}

/// CLI error type
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// Session configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Session setup error (artifact provisioning, command construction)
    #[error("Setup error: {0}")]
    Setup(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        Self::Config(err.to_string())
    }
}

impl From<CommandError> for CliError {
    fn from(err: CommandError) -> Self {
        Self::Setup(err.to_string())
    }
}

impl CliError {
    /// Returns the process exit code for this error.
    ///
    /// Every error reachable here is fatal configuration or setup: the
    /// retry loop never surfaces errors, so there is a single non-zero
    /// code.
    #[must_use]
    pub const fn exit_code(&self) -> i32 {
        exit_codes::GENERAL_ERROR
    }
}
