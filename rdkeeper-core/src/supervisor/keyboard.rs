//! Keyboard layout setup for RDP sessions
//!
//! Configures the X keyboard layout once before the retry loop starts.
//! The detected system layout is tried first, then the `us` fallback.
//! Failure to set either is tolerated: the session runs with whatever
//! layout is active.
//!
//! # Detection Strategy
//!
//! 1. Check `XKB_DEFAULT_LAYOUT` environment variable
//! 2. Parse `localectl status` output
//! 3. Fall back to `us`

use std::process::Command;

/// Layout tried when detection fails or the detected layout is rejected
const FALLBACK_LAYOUT: &str = "us";

/// Configures the keyboard layout, preferring the detected system layout
/// and falling back to [`FALLBACK_LAYOUT`]. Never fails the session.
pub fn configure_layout() {
    let primary = detect_system_layout().unwrap_or_else(|| FALLBACK_LAYOUT.to_string());
    if set_layout(&primary) {
        return;
    }
    if primary != FALLBACK_LAYOUT && set_layout(FALLBACK_LAYOUT) {
        return;
    }
    tracing::warn!("Unable to configure a keyboard layout; continuing with the current one");
}

/// Runs `setxkbmap` for a layout, reporting success
fn set_layout(layout: &str) -> bool {
    match Command::new("setxkbmap").arg(layout).status() {
        Ok(status) if status.success() => {
            tracing::info!(layout, "Keyboard layout configured");
            true
        }
        Ok(status) => {
            tracing::debug!(layout, %status, "setxkbmap rejected layout");
            false
        }
        Err(e) => {
            tracing::debug!(layout, error = %e, "setxkbmap unavailable");
            false
        }
    }
}

/// Detects the system XKB layout name
fn detect_system_layout() -> Option<String> {
    if let Ok(layout) = std::env::var("XKB_DEFAULT_LAYOUT") {
        let name = layout.split(',').next().unwrap_or(&layout).trim();
        if !name.is_empty() {
            return Some(name.to_string());
        }
    }
    detect_from_localectl()
}

/// Parses `localectl status` to extract the XKB layout name
fn detect_from_localectl() -> Option<String> {
    let output = Command::new("localectl").arg("status").output().ok()?;
    if !output.status.success() {
        return None;
    }
    parse_localectl_output(&String::from_utf8_lossy(&output.stdout))
}

/// Extracts the first layout from `X11 Layout:` or `VC Keymap:` lines
fn parse_localectl_output(stdout: &str) -> Option<String> {
    for line in stdout.lines() {
        let trimmed = line.trim();
        if trimmed.starts_with("X11 Layout:") || trimmed.starts_with("VC Keymap:") {
            let value = trimmed.split(':').nth(1)?.trim();
            // Take first layout if comma-separated; localectl prints
            // "(unset)" for missing keymaps
            let name = value.split(',').next().unwrap_or(value).trim();
            if !name.is_empty() && name != "(unset)" {
                return Some(name.to_string());
            }
        }
    }
    None
}
