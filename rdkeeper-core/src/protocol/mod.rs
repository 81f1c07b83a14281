//! Client command construction
//!
//! Builds the exact argument vector for the chosen client backend. Three
//! mutually exclusive branches exist, selected by the client kind and the
//! presence of an AVD payload: standard RDP, AVD gateway-brokered RDP, and
//! VNC. Command vectors are rebuilt fresh on every retry iteration so the
//! values they carry are never stale.

mod avd;
mod freerdp;
mod vnc;

pub use avd::{AvdDescriptor, build_avd_command};
pub use freerdp::{RDP_PROGRAM, STANDARD_RDP_DEFAULT_ARGS, build_standard_rdp_command};
pub use vnc::{VNC_PROGRAM, VncPasswordFile, build_vnc_command};

use secrecy::SecretString;

/// A fully resolved client invocation
///
/// `stdin_secret` carries a credential the launcher pipes into the child's
/// stdin (FreeRDP's `/from-stdin`) so it never appears in process listings.
pub struct ClientCommand {
    /// Program to execute
    pub program: String,
    /// Ordered command-line arguments
    pub args: Vec<String>,
    /// Credential written to the child's stdin after spawn
    pub stdin_secret: Option<SecretString>,
}

impl ClientCommand {
    /// Creates a command with no stdin credential
    #[must_use]
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
            stdin_secret: None,
        }
    }

    /// Attaches a credential to be piped over stdin
    #[must_use]
    pub fn with_stdin_secret(mut self, secret: SecretString) -> Self {
        self.stdin_secret = Some(secret);
        self
    }

    /// Formats the command for log output with sensitive arguments masked
    #[must_use]
    pub fn display_masked(&self) -> String {
        let masked: Vec<String> = self
            .args
            .iter()
            .map(|arg| {
                if is_sensitive_arg(arg) {
                    mask_arg(arg)
                } else {
                    arg.clone()
                }
            })
            .collect();
        format!("{} {}", self.program, masked.join(" "))
    }
}

/// Whether an argument carries a credential that must be masked in logs
fn is_sensitive_arg(arg: &str) -> bool {
    let lower = arg.to_lowercase();
    lower.starts_with("/p:")
        || lower.starts_with("/gat:")
        || lower.starts_with("--password")
        || lower.contains("password=")
        || lower.contains("passwd=")
        || lower.contains("secret=")
        || lower.contains("token=")
}

/// Masks the value portion of a sensitive argument, preserving the key
/// prefix for readability
fn mask_arg(arg: &str) -> String {
    for prefix in ["/p:", "/gat:"] {
        if arg.to_lowercase().starts_with(prefix) {
            return format!("{prefix}****");
        }
    }
    for sep in ['=', ' '] {
        if let Some(pos) = arg.find(sep) {
            let prefix = &arg[..=pos];
            return format!("{prefix}****");
        }
    }
    "****".to_string()
}
