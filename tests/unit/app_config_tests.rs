/*!
 * Tests for application configuration
 */

use anyhow::Result;
use kwicindex::app_config::{Config, ExportFormat, LogLevel};
use kwicindex::export::GroupingPolicy;

/// Test default configuration values
#[test]
fn test_config_default_shouldUseExpectedValues() {
    let config = Config::default();

    assert_eq!(config.grouping, GroupingPolicy::Keyword);
    assert_eq!(config.export.format, ExportFormat::Xml);
    assert!(config.export.indent);
    assert!(!config.export.sort);
    assert_eq!(config.log_level, LogLevel::Info);
}

/// Test serialization round-trip of the configuration
#[test]
fn test_config_serde_roundTrip_shouldPreserveValues() -> Result<()> {
    let mut config = Config::default();
    config.grouping = GroupingPolicy::Lemma;
    config.export.format = ExportFormat::Json;
    config.export.indent = false;
    config.export.sort = true;
    config.log_level = LogLevel::Debug;

    let json = serde_json::to_string_pretty(&config)?;
    let parsed: Config = serde_json::from_str(&json)?;

    assert_eq!(parsed.grouping, GroupingPolicy::Lemma);
    assert_eq!(parsed.export.format, ExportFormat::Json);
    assert!(!parsed.export.indent);
    assert!(parsed.export.sort);
    assert_eq!(parsed.log_level, LogLevel::Debug);

    Ok(())
}

/// Test parsing a partial configuration file applies defaults
#[test]
fn test_config_fromPartialJson_shouldApplyDefaults() -> Result<()> {
    let json = r#"{ "grouping": "initial" }"#;

    let config: Config = serde_json::from_str(json)?;

    assert_eq!(config.grouping, GroupingPolicy::Initial);
    assert_eq!(config.export.format, ExportFormat::Xml);
    assert!(config.export.indent);
    assert_eq!(config.log_level, LogLevel::Info);

    Ok(())
}

/// Test lowercase enum encoding in the configuration file
#[test]
fn test_config_serde_shouldUseLowercaseIdentifiers() -> Result<()> {
    let mut config = Config::default();
    config.export.format = ExportFormat::Contexts;
    config.log_level = LogLevel::Trace;

    let json = serde_json::to_string(&config)?;

    assert!(json.contains("\"keyword\""));
    assert!(json.contains("\"contexts\""));
    assert!(json.contains("\"trace\""));

    Ok(())
}

/// Test configuration validation accepts the defaults
#[test]
fn test_config_validate_withDefaults_shouldSucceed() {
    let config = Config::default();

    assert!(config.validate().is_ok());
}

/// Test export format conversions and extensions
#[test]
fn test_export_format_conversions_shouldRoundTrip() {
    for format in [ExportFormat::Xml, ExportFormat::Json, ExportFormat::Contexts] {
        let parsed: ExportFormat = format.to_string().parse().unwrap();
        assert_eq!(parsed, format);
    }

    assert_eq!(ExportFormat::Xml.extension(), "xml");
    assert_eq!(ExportFormat::Json.extension(), "json");
    assert_eq!(ExportFormat::Contexts.extension(), "json");
    assert_eq!(ExportFormat::Xml.display_name(), "XML");
    assert!("yaml".parse::<ExportFormat>().is_err());
}
