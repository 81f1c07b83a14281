//! Network-mode resolution
//!
//! Decides, from the configured VPN mode, whether client invocations are
//! wrapped in a proxy-chaining prefix and whether DNS readiness must be
//! verified before connecting. The mapping is a pure function of the mode
//! and is derived once at startup, never mutated.

use crate::config::VpnMode;

/// Proxy wrapper applied to client invocations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProxyDirective {
    /// Spawn the client directly
    None,
    /// Prefix the client invocation with a SOCKS proxy-chain wrapper
    ProxyChain,
}

impl ProxyDirective {
    /// Returns the argv prefix prepended to every client invocation
    #[must_use]
    pub const fn command_prefix(self) -> &'static [&'static str] {
        match self {
            // -q keeps the wrapper's banner out of session logs
            Self::ProxyChain => &["proxychains4", "-q"],
            Self::None => &[],
        }
    }

    /// Whether client invocations are wrapped
    #[must_use]
    pub const fn is_wrapped(self) -> bool {
        matches!(self, Self::ProxyChain)
    }
}

/// Routing decision derived from the VPN mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoutePlan {
    /// Proxy wrapper requirement
    pub proxy: ProxyDirective,
    /// Whether DNS readiness must be confirmed before connecting
    pub dns_probe_required: bool,
}

impl RoutePlan {
    /// Resolves the routing plan for a VPN mode
    ///
    /// - `Direct`: no wrapper, no probing
    /// - `OpenVpn`: no wrapper (traffic already routes through the tunnel
    ///   interface), but the tunnel's DNS must be confirmed working
    /// - `WireGuard`/`Tailscale`: proxy-chain wrapper, resolution happens
    ///   normally so no probing
    #[must_use]
    pub const fn for_mode(mode: VpnMode) -> Self {
        match mode {
            VpnMode::Direct => Self {
                proxy: ProxyDirective::None,
                dns_probe_required: false,
            },
            VpnMode::OpenVpn => Self {
                proxy: ProxyDirective::None,
                dns_probe_required: true,
            },
            VpnMode::WireGuard | VpnMode::Tailscale => Self {
                proxy: ProxyDirective::ProxyChain,
                dns_probe_required: false,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direct_no_wrapper_no_probe() {
        let plan = RoutePlan::for_mode(VpnMode::Direct);
        assert_eq!(plan.proxy, ProxyDirective::None);
        assert!(!plan.dns_probe_required);
    }

    #[test]
    fn test_openvpn_no_wrapper_but_probe() {
        let plan = RoutePlan::for_mode(VpnMode::OpenVpn);
        assert_eq!(plan.proxy, ProxyDirective::None);
        assert!(plan.dns_probe_required);
    }

    #[test]
    fn test_proxied_modes_wrap_without_probe() {
        for mode in [VpnMode::WireGuard, VpnMode::Tailscale] {
            let plan = RoutePlan::for_mode(mode);
            assert_eq!(plan.proxy, ProxyDirective::ProxyChain);
            assert!(!plan.dns_probe_required);
        }
    }

    #[test]
    fn test_resolution_is_pure() {
        for mode in [
            VpnMode::Direct,
            VpnMode::OpenVpn,
            VpnMode::WireGuard,
            VpnMode::Tailscale,
        ] {
            assert_eq!(RoutePlan::for_mode(mode), RoutePlan::for_mode(mode));
        }
    }

    #[test]
    fn test_command_prefix() {
        assert!(ProxyDirective::None.command_prefix().is_empty());
        assert_eq!(
            ProxyDirective::ProxyChain.command_prefix(),
            &["proxychains4", "-q"]
        );
        assert!(ProxyDirective::ProxyChain.is_wrapped());
        assert!(!ProxyDirective::None.is_wrapped());
    }
}
