//! Client process launching
//!
//! The [`Launcher`] trait is the supervisor's spawn seam: production code
//! uses [`ProcessLauncher`], tests substitute a counting fake to verify
//! the retry invariant without spawning anything.

use std::io::Write;
use std::process::{Command, ExitStatus, Stdio};

use secrecy::ExposeSecret;

use crate::protocol::ClientCommand;

/// Spawns a client invocation and waits for it to exit
pub trait Launcher {
    /// Runs the command to completion, blocking until the child exits.
    ///
    /// # Errors
    ///
    /// Returns the spawn or wait error; the supervisor treats it like any
    /// other exit and retries.
    fn launch(&mut self, command: &ClientCommand) -> std::io::Result<ExitStatus>;
}

/// Launcher backed by [`std::process::Command`]
///
/// When the command carries a stdin credential the child is spawned with
/// a piped stdin and the credential is written followed by a newline,
/// matching FreeRDP's `/from-stdin` contract.
pub struct ProcessLauncher;

impl Launcher for ProcessLauncher {
    fn launch(&mut self, command: &ClientCommand) -> std::io::Result<ExitStatus> {
        let mut cmd = Command::new(&command.program);
        cmd.args(&command.args);
        if command.stdin_secret.is_some() {
            cmd.stdin(Stdio::piped());
        }

        let mut child = cmd.spawn()?;

        if let Some(secret) = &command.stdin_secret
            && let Some(mut stdin) = child.stdin.take()
        {
            // Closing the pipe after the write signals end of input
            writeln!(stdin, "{}", secret.expose_secret())?;
        }

        child.wait()
    }
}
