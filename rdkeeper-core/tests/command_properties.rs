//! Property tests for client command construction

use proptest::prelude::*;
use rdkeeper_core::config::{ClientKind, SessionConfig, VpnMode};
use rdkeeper_core::protocol::{STANDARD_RDP_DEFAULT_ARGS, build_standard_rdp_command};
use secrecy::SecretString;

fn config_with_password(password: &str) -> SessionConfig {
    SessionConfig::new(
        VpnMode::Direct,
        ClientKind::Rdp,
        "target.example.com",
        3389,
        "operator",
        SecretString::from(password),
    )
}

proptest! {
    /// Property: the password never appears in the argument vector or in
    /// the masked rendering, for any password
    #[test]
    fn password_never_reaches_argv(password in "[a-zA-Z0-9!@#$%^&*]{4,24}") {
        let command = build_standard_rdp_command(&config_with_password(&password), &[]);
        prop_assert!(!command.args.iter().any(|a| a.contains(&password)));
        prop_assert!(!command.display_masked().contains(&password));
    }

    /// Property: with extras present, none of the default flags is added
    #[test]
    fn extras_exclude_defaults(extras in prop::collection::vec("[a-z0-9/:]{1,10}", 1..6)) {
        prop_assume!(extras.iter().all(|e| !STANDARD_RDP_DEFAULT_ARGS.contains(&e.as_str())));
        let command = build_standard_rdp_command(&config_with_password("pw"), &extras);
        for flag in STANDARD_RDP_DEFAULT_ARGS {
            prop_assert!(!command.args.contains(&flag.to_string()));
        }
        // Extras are appended verbatim, in order, after the three base args
        prop_assert_eq!(&command.args[3..], extras.as_slice());
    }

    /// Property: the base triple is invariant under extras
    #[test]
    fn base_arguments_are_stable(extras in prop::collection::vec("[a-z0-9/:]{1,10}", 0..6)) {
        let command = build_standard_rdp_command(&config_with_password("pw"), &extras);
        prop_assert_eq!(&command.args[0], "/u:operator");
        prop_assert_eq!(&command.args[1], "/from-stdin");
        prop_assert_eq!(&command.args[2], "/v:target.example.com:3389");
    }
}
