//! Operator-visible routing and DNS diagnostics
//!
//! Emitted before each RDP connection attempt in OpenVPN mode, where the
//! tunnel's resolver and routes are the usual failure points. Everything
//! here is best-effort: unreadable state is logged as a warning, never
//! fatal.

use std::process::Command;

/// Route-table tools tried in order; the first one that runs wins
const ROUTE_TOOLS: &[(&str, &[&str])] = &[("ip", &["route"]), ("route", &["-n"])];

/// Logs the current resolver configuration and route table
pub fn log_route_and_dns() {
    match std::fs::read_to_string("/etc/resolv.conf") {
        Ok(contents) => tracing::info!(resolv_conf = %contents.trim_end(), "Current DNS configuration"),
        Err(e) => tracing::warn!(error = %e, "Could not read resolver configuration"),
    }

    match read_route_table() {
        Some(routes) => tracing::info!(routes = %routes.trim_end(), "Current route table"),
        None => tracing::warn!("Could not read route table"),
    }
}

/// Output of the first working route-table tool
fn read_route_table() -> Option<String> {
    for (tool, args) in ROUTE_TOOLS {
        if let Ok(output) = Command::new(tool).args(*args).output()
            && output.status.success()
        {
            return Some(String::from_utf8_lossy(&output.stdout).into_owned());
        }
    }
    None
}
