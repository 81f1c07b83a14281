//! VNC command builder and password-file provisioning
//!
//! The VNC invocation is fixed — it does not branch on extra parameters.
//! Authentication uses a password file under the per-user `.vnc`
//! directory, written once per supervisor start (not per retry) with
//! restricted permissions, in the obfuscated format produced by
//! `vncpasswd -f`.

use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use secrecy::{ExposeSecret, SecretString};

use crate::config::SessionConfig;
use crate::error::CommandError;

use super::ClientCommand;

/// VNC viewer binary
pub const VNC_PROGRAM: &str = "vncviewer";

/// Provisioned VNC password file
pub struct VncPasswordFile {
    path: PathBuf,
}

impl VncPasswordFile {
    /// Writes the session password, obfuscated by `vncpasswd -f`, to
    /// `$HOME/.vnc/passwd` with mode 0600. Overwrites any previous file.
    ///
    /// # Errors
    ///
    /// Failing to locate the home directory, run `vncpasswd`, or write
    /// the file is fatal: without the file the viewer cannot
    /// authenticate.
    pub fn provision(password: &SecretString) -> Result<Self, CommandError> {
        let dir = dirs::home_dir()
            .ok_or(CommandError::NoHomeDirectory)?
            .join(".vnc");
        let path = dir.join("passwd");

        std::fs::create_dir_all(&dir).map_err(|e| CommandError::PasswordFile {
            path: path.clone(),
            reason: e.to_string(),
        })?;

        let obfuscated = obfuscate(password).map_err(|reason| CommandError::PasswordFile {
            path: path.clone(),
            reason,
        })?;

        std::fs::write(&path, &obfuscated).map_err(|e| CommandError::PasswordFile {
            path: path.clone(),
            reason: e.to_string(),
        })?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o600)).map_err(
                |e| CommandError::PasswordFile {
                    path: path.clone(),
                    reason: e.to_string(),
                },
            )?;
        }

        tracing::debug!(path = %path.display(), "VNC password file provisioned");
        Ok(Self { path })
    }

    /// Path of the password file
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Runs `vncpasswd -f`, feeding the plain password over stdin and
/// returning the obfuscated bytes it emits.
fn obfuscate(password: &SecretString) -> Result<Vec<u8>, String> {
    let mut child = Command::new("vncpasswd")
        .arg("-f")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::null())
        .spawn()
        .map_err(|e| format!("failed to run vncpasswd: {e}"))?;

    if let Some(mut stdin) = child.stdin.take() {
        writeln!(stdin, "{}", password.expose_secret())
            .map_err(|e| format!("failed to pass password to vncpasswd: {e}"))?;
    }

    let output = child
        .wait_with_output()
        .map_err(|e| format!("vncpasswd did not complete: {e}"))?;
    if !output.status.success() {
        return Err(format!("vncpasswd exited with {}", output.status));
    }
    if output.stdout.is_empty() {
        return Err("vncpasswd produced no output".to_string());
    }
    Ok(output.stdout)
}

/// Builds the fixed VNC invocation: full-screen, menu key disabled, the
/// viewer's own reconnect-on-error prompt suppressed (the supervisor owns
/// reconnection), authenticating via the provisioned password file.
#[must_use]
pub fn build_vnc_command(config: &SessionConfig, passwd_path: &Path) -> ClientCommand {
    let display = if config.port >= 5900 {
        config.port - 5900
    } else {
        config.port
    };

    let args = vec![
        "-FullScreen".to_string(),
        "-MenuKey".to_string(),
        "None".to_string(),
        "-ReconnectOnError=0".to_string(),
        "-passwd".to_string(),
        passwd_path.display().to_string(),
        format!("{}:{display}", config.host),
    ];

    ClientCommand::new(VNC_PROGRAM, args)
}
