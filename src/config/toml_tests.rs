//! Tests for TOML configuration parsing.

use super::toml::{TomlConfig, default_config_template};

mod parsing {
    use super::*;

    #[test]
    fn parse_full_config() {
        let toml = r#"
            [monitor]
            interval = "10s"
            interface = "eth0"

            [apply]
            prune_absent_families = true
        "#;

        let config = TomlConfig::parse(toml).unwrap();

        assert_eq!(config.monitor.interval.as_deref(), Some("10s"));
        assert_eq!(config.monitor.interface.as_deref(), Some("eth0"));
        assert!(config.apply.prune_absent_families);
    }

    #[test]
    fn empty_config_uses_defaults() {
        let config = TomlConfig::parse("").unwrap();

        assert!(config.monitor.interval.is_none());
        assert!(config.monitor.interface.is_none());
        assert!(!config.apply.prune_absent_families);
    }

    #[test]
    fn partial_sections_are_allowed() {
        let config = TomlConfig::parse("[apply]\n").unwrap();
        assert!(!config.apply.prune_absent_families);
    }
}

mod errors {
    use super::*;

    #[test]
    fn unknown_section_is_rejected() {
        let result = TomlConfig::parse("[logging]\nlevel = \"debug\"\n");
        assert!(result.is_err());
    }

    #[test]
    fn unknown_field_is_rejected() {
        let result = TomlConfig::parse("[monitor]\npoll_interval = 5\n");
        assert!(result.is_err());
    }

    #[test]
    fn wrong_type_is_rejected() {
        let result = TomlConfig::parse("[apply]\nprune_absent_families = \"yes\"\n");
        assert!(result.is_err());
    }

    #[test]
    fn syntax_error_is_rejected() {
        let result = TomlConfig::parse("[monitor");
        assert!(result.is_err());
    }
}

mod template {
    use super::*;

    #[test]
    fn default_template_parses() {
        let config = TomlConfig::parse(&default_config_template()).unwrap();

        assert_eq!(config.monitor.interval.as_deref(), Some("5s"));
        assert!(config.monitor.interface.is_none());
        assert!(!config.apply.prune_absent_families);
    }

    #[test]
    fn default_template_documents_sections() {
        let template = default_config_template();

        assert!(template.contains("[monitor]"));
        assert!(template.contains("[apply]"));
        assert!(template.contains("# interface = \"eth0\""));
    }
}
