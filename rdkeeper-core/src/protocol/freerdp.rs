//! Standard RDP command builder
//!
//! Builds the FreeRDP (xfreerdp) invocation for a direct RDP session.
//! The password travels over stdin via `/from-stdin` rather than argv,
//! keeping it out of `/proc/PID/cmdline`.

use crate::config::SessionConfig;

use super::ClientCommand;

/// FreeRDP client binary
pub const RDP_PROGRAM: &str = "xfreerdp";

/// Defaults applied when no extra parameters are configured: full-screen,
/// auto-reconnect, clipboard sharing, certificate-ignore.
pub const STANDARD_RDP_DEFAULT_ARGS: [&str; 4] =
    ["/f", "+auto-reconnect", "+clipboard", "/cert:ignore"];

/// Builds the standard RDP invocation.
///
/// The base is always `/u:<username> /from-stdin /v:<host>:<port>`. When
/// extra parameters were configured they are appended as-is and fully
/// replace the defaults; otherwise the fixed default set is appended.
#[must_use]
pub fn build_standard_rdp_command(config: &SessionConfig, extras: &[String]) -> ClientCommand {
    let mut args = vec![
        format!("/u:{}", config.username),
        "/from-stdin".to_string(),
        format!("/v:{}:{}", config.host, config.port),
    ];

    if extras.is_empty() {
        args.extend(STANDARD_RDP_DEFAULT_ARGS.iter().map(|s| (*s).to_string()));
    } else {
        args.extend(extras.iter().cloned());
    }

    ClientCommand::new(RDP_PROGRAM, args).with_stdin_secret(config.password.clone())
}
