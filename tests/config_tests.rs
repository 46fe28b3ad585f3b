use farecard::{CliOverrides, Config, ConfigError, Locale, OutputFormat};
use std::fs;
use tempfile::TempDir;

#[test]
fn test_defaults() {
    let config = Config::default();
    assert_eq!(config.locale, Locale::English);
    assert_eq!(config.format, OutputFormat::Text);
    assert_eq!(config.log_filter, "warn");
    assert!(!config.show_data);
}

#[test]
fn test_load_partial_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("farecard.json");
    fs::write(&path, r#"{ "locale": "de", "format": "json" }"#).unwrap();

    let config = Config::load(&path).unwrap();
    assert_eq!(config.locale, Locale::German);
    assert_eq!(config.format, OutputFormat::Json);
    assert_eq!(config.log_filter, "warn");
}

#[test]
fn test_unknown_field_rejected() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("farecard.json");
    fs::write(&path, r#"{ "colour": true }"#).unwrap();
    assert!(matches!(Config::load(&path), Err(ConfigError::Json(_))));
}

#[test]
fn test_missing_file() {
    let dir = TempDir::new().unwrap();
    let err = Config::load(&dir.path().join("nope.json")).unwrap_err();
    assert!(matches!(err, ConfigError::Io { .. }));
}

#[test]
fn test_overrides() {
    let config = Config::default()
        .with_locale_tag("fr-CA")
        .unwrap()
        .with_format(OutputFormat::Json)
        .with_log_filter("farecard=debug")
        .with_data(true);
    assert_eq!(config.locale, Locale::French);
    assert_eq!(config.format, OutputFormat::Json);
    assert_eq!(config.log_filter, "farecard=debug");
    assert!(config.show_data);

    assert!(matches!(
        Config::default().with_locale_tag("xx"),
        Err(ConfigError::Locale(_))
    ));
}

#[test]
fn test_resolve_without_file_uses_defaults() {
    let config = Config::resolve(None, &CliOverrides::default()).unwrap();
    assert_eq!(config, Config::default());
}

#[test]
fn test_resolve_file_over_defaults_cli_over_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("farecard.json");
    fs::write(
        &path,
        r#"{ "locale": "de", "format": "json", "log_filter": "farecard=info" }"#,
    )
    .unwrap();

    let file_only = Config::resolve(Some(&path), &CliOverrides::default()).unwrap();
    assert_eq!(file_only.locale, Locale::German);
    assert_eq!(file_only.format, OutputFormat::Json);
    assert_eq!(file_only.log_filter, "farecard=info");
    assert!(!file_only.show_data);

    let overrides = CliOverrides {
        locale: Some("fr".to_string()),
        show_data: true,
        ..CliOverrides::default()
    };
    let config = Config::resolve(Some(&path), &overrides).unwrap();
    assert_eq!(config.locale, Locale::French);
    assert!(config.show_data);
    // unset flags keep the file's values
    assert_eq!(config.format, OutputFormat::Json);
    assert_eq!(config.log_filter, "farecard=info");

    let overrides = CliOverrides {
        log_filter: Some("farecard=trace,info".to_string()),
        format: Some(OutputFormat::Text),
        ..CliOverrides::default()
    };
    let config = Config::resolve(Some(&path), &overrides).unwrap();
    assert_eq!(config.locale, Locale::German);
    assert_eq!(config.format, OutputFormat::Text);
    assert_eq!(config.log_filter, "farecard=trace,info");
}

#[test]
fn test_resolve_errors() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("nope.json");
    assert!(matches!(
        Config::resolve(Some(&missing), &CliOverrides::default()),
        Err(ConfigError::Io { .. })
    ));

    let overrides = CliOverrides {
        locale: Some("xx".to_string()),
        ..CliOverrides::default()
    };
    assert!(matches!(
        Config::resolve(None, &overrides),
        Err(ConfigError::Locale(_))
    ));
}
