//! Tests for CLI argument parsing.

use std::path::Path;
use std::time::Duration;

use clap::Parser;

use super::cli::{Cli, Command};

mod parsing {
    use super::*;

    #[test]
    fn parse_interfaces_command() {
        let cli = Cli::parse_from_iter(["ifstate", "interfaces"]);

        assert!(matches!(cli.command, Command::Interfaces));
        assert!(cli.config.is_none());
        assert!(!cli.verbose);
    }

    #[test]
    fn parse_addresses_requires_interface() {
        let cli = Cli::parse_from_iter(["ifstate", "addresses", "-i", "eth0"]);

        match cli.command {
            Command::Addresses { interface } => assert_eq!(interface, "eth0"),
            other => panic!("unexpected command: {other:?}"),
        }
        assert!(Cli::try_parse_from(["ifstate", "addresses"]).is_err());
    }

    #[test]
    fn parse_apply_config_flags() {
        let cli = Cli::parse_from_iter([
            "ifstate",
            "apply-config",
            "-f",
            "desired.json",
            "--dry-run",
            "--prune-families",
        ]);

        match cli.command {
            Command::ApplyConfig {
                file,
                dry_run,
                prune_families,
            } => {
                assert_eq!(file, Path::new("desired.json"));
                assert!(dry_run);
                assert!(prune_families);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn parse_apply_config_defaults() {
        let cli = Cli::parse_from_iter(["ifstate", "apply-config", "--file", "d.json"]);

        assert!(matches!(
            cli.command,
            Command::ApplyConfig {
                dry_run: false,
                prune_families: false,
                ..
            }
        ));
    }

    #[test]
    fn parse_monitor_options() {
        let cli = Cli::parse_from_iter(["ifstate", "monitor", "-t", "500ms", "-i", "wg0"]);

        match cli.command {
            Command::Monitor {
                interval,
                interface,
            } => {
                assert_eq!(interval, Some(Duration::from_millis(500)));
                assert_eq!(interface.as_deref(), Some("wg0"));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn monitor_bare_interval_is_seconds() {
        let cli = Cli::parse_from_iter(["ifstate", "monitor", "--interval", "30"]);

        assert!(matches!(
            cli.command,
            Command::Monitor { interval: Some(d), .. } if d == Duration::from_secs(30)
        ));
    }

    #[test]
    fn monitor_rejects_bad_interval() {
        let result = Cli::try_parse_from(["ifstate", "monitor", "-t", "soon"]);
        assert!(result.is_err());
    }

    #[test]
    fn monitor_without_options() {
        let cli = Cli::parse_from_iter(["ifstate", "monitor"]);

        assert!(matches!(
            cli.command,
            Command::Monitor {
                interval: None,
                interface: None
            }
        ));
    }
}

mod global_flags {
    use super::*;

    #[test]
    fn config_and_verbose_after_subcommand() {
        let cli = Cli::parse_from_iter([
            "ifstate",
            "monitor",
            "--config",
            "/etc/ifstate.toml",
            "-v",
        ]);

        assert_eq!(cli.config.as_deref(), Some(Path::new("/etc/ifstate.toml")));
        assert!(cli.verbose);
    }

    #[test]
    fn config_before_subcommand() {
        let cli = Cli::parse_from_iter(["ifstate", "-c", "custom.toml", "interfaces"]);

        assert_eq!(cli.config.as_deref(), Some(Path::new("custom.toml")));
    }

    #[test]
    fn subcommand_is_required() {
        assert!(Cli::try_parse_from(["ifstate"]).is_err());
    }
}

mod init_command {
    use super::*;

    #[test]
    fn parse_init_default_output() {
        let cli = Cli::parse_from_iter(["ifstate", "init"]);

        assert!(cli.is_init());
        match cli.command {
            Command::Init { output } => assert_eq!(output, Path::new("ifstate.toml")),
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn parse_init_custom_output() {
        let cli = Cli::parse_from_iter(["ifstate", "init", "-o", "custom.toml"]);

        assert!(matches!(
            cli.command,
            Command::Init { ref output } if output == Path::new("custom.toml")
        ));
    }

    #[test]
    fn other_commands_are_not_init() {
        let cli = Cli::parse_from_iter(["ifstate", "interfaces"]);
        assert!(!cli.is_init());
    }
}
