//! DNS readiness probing
//!
//! Advisory checks run before connecting when the routing plan requires
//! them (OpenVPN mode, where resolution depends on the tunnel's own DNS).
//! None of these gate the session: exhausting the readiness poll or failing
//! a resolution test logs a warning and the session proceeds with reduced
//! confidence.

use std::net::IpAddr;
use std::path::Path;
use std::process::Command;
use std::time::Duration;

use crate::params::extract_load_balancer_host;

/// Default number of resolver-readiness poll attempts
pub const DEFAULT_MAX_ATTEMPTS: u32 = 30;

/// Default interval between readiness poll attempts
pub const DEFAULT_PROBE_INTERVAL: Duration = Duration::from_secs(1);

/// System resolver configuration file
const RESOLVER_CONFIG_PATH: &str = "/etc/resolv.conf";

/// Resolution utilities tried in preference order; the first one present
/// on PATH wins.
const RESOLUTION_TOOLS: &[(&str, &[&str])] = &[
    ("getent", &["hosts"]),
    ("host", &[]),
    ("nslookup", &[]),
    ("dig", &["+short"]),
];

/// Waits for the system resolver configuration to become usable.
///
/// Polls for the existence of `/etc/resolv.conf` with at least one
/// `nameserver` entry, up to [`DEFAULT_MAX_ATTEMPTS`] attempts spaced
/// [`DEFAULT_PROBE_INTERVAL`] apart. Returns `true` as soon as the
/// configuration is ready. Exhaustion returns `false` but does not abort
/// the session — the check is advisory.
#[must_use]
pub fn wait_for_resolver_ready() -> bool {
    wait_for_resolver_ready_at(
        Path::new(RESOLVER_CONFIG_PATH),
        DEFAULT_MAX_ATTEMPTS,
        DEFAULT_PROBE_INTERVAL,
    )
}

/// [`wait_for_resolver_ready`] against an explicit path, attempt budget
/// and interval.
#[must_use]
pub fn wait_for_resolver_ready_at(path: &Path, max_attempts: u32, interval: Duration) -> bool {
    for attempt in 1..=max_attempts {
        if resolver_config_ready(path) {
            tracing::info!(attempt, "DNS resolver configuration is ready");
            return true;
        }
        if attempt < max_attempts {
            std::thread::sleep(interval);
        }
    }
    tracing::warn!(
        attempts = max_attempts,
        path = %path.display(),
        "DNS resolver configuration not ready; continuing anyway"
    );
    false
}

/// Whether the resolver configuration file exists and names a resolver
fn resolver_config_ready(path: &Path) -> bool {
    std::fs::read_to_string(path).is_ok_and(|content| {
        content
            .lines()
            .any(|line| line.trim_start().starts_with("nameserver"))
    })
}

/// Tests resolution of a hostname through the first available system
/// resolution utility.
///
/// Returns the first address found in the tool's output, or `None` when
/// no tool is installed, the lookup fails, or no address can be parsed.
/// Emits a diagnostic line either way; never fails the session.
#[must_use]
pub fn test_resolution(host: &str) -> Option<IpAddr> {
    let Some((tool, base_args)) = RESOLUTION_TOOLS
        .iter()
        .copied()
        .find(|(tool, _)| tool_available(tool))
    else {
        tracing::warn!(host, "No resolution utility available to test DNS");
        return None;
    };

    let output = match Command::new(tool).args(base_args).arg(host).output() {
        Ok(output) => output,
        Err(e) => {
            tracing::warn!(host, tool, error = %e, "Resolution test failed to run");
            return None;
        }
    };

    let stdout = String::from_utf8_lossy(&output.stdout);
    match first_address_in(&stdout) {
        Some(addr) => {
            tracing::info!(host, tool, address = %addr, "Resolution test succeeded");
            Some(addr)
        }
        None => {
            tracing::warn!(host, tool, "Resolution test returned no address");
            None
        }
    }
}

/// Tests resolution of the load-balancer hostname embedded in the extra
/// parameters, if any.
///
/// Extraction failure (no `/load-balance-info:` marker, no `Plugin.1.`
/// segment) is a no-op, not an error.
pub fn test_load_balancer_resolution(extra_params: &str) {
    let Some(host) = extract_load_balancer_host(extra_params) else {
        return;
    };
    tracing::info!(host, "Testing load-balancer hostname resolution");
    let _ = test_resolution(&host);
}

/// Whether a tool is present on PATH
fn tool_available(tool: &str) -> bool {
    Command::new("which")
        .arg(tool)
        .output()
        .is_ok_and(|output| output.status.success())
}

/// First IP address token in a tool's output
fn first_address_in(text: &str) -> Option<IpAddr> {
    text.split_whitespace()
        .find_map(|token| token.trim_end_matches('.').parse().ok())
}
