/*!
 * Tests for configuration and the credential store
 */

use std::str::FromStr;

use srtran::app_config::{Config, CredentialStore, TargetLanguage, TranslationMode};
use srtran::errors::ConfigError;

#[test]
fn test_config_default_shouldMatchDocumentedDefaults() {
    let config = Config::default();

    assert_eq!(config.target_language, TargetLanguage::Vi);
    assert_eq!(config.mode, TranslationMode::SmoothHumorous);
    assert_eq!(config.model, "gemini-2.0-flash");
    assert_eq!(config.max_entries_per_batch, 25);
    assert_eq!(config.min_display_ms, 800);
    assert!(config.validate().is_ok());
}

#[test]
fn test_config_validate_withZeroBatchSize_shouldFail() {
    let config = Config {
        max_entries_per_batch: 0,
        ..Config::default()
    };
    assert!(matches!(
        config.validate(),
        Err(ConfigError::InvalidBatchSize(0))
    ));
}

#[test]
fn test_config_validate_withEmptyModel_shouldFail() {
    let config = Config {
        model: "  ".to_string(),
        ..Config::default()
    };
    assert!(matches!(config.validate(), Err(ConfigError::EmptyModel)));
}

#[test]
fn test_config_validate_withBadEndpoint_shouldFail() {
    let config = Config {
        endpoint: "not a url".to_string(),
        ..Config::default()
    };
    assert!(matches!(
        config.validate(),
        Err(ConfigError::InvalidEndpoint(_))
    ));
}

#[test]
fn test_config_roundtrip_throughJson() {
    let config = Config {
        target_language: TargetLanguage::Fr,
        mode: TranslationMode::Fast,
        ..Config::default()
    };

    let json = serde_json::to_string(&config).unwrap();
    let parsed: Config = serde_json::from_str(&json).unwrap();

    assert_eq!(parsed.target_language, TargetLanguage::Fr);
    assert_eq!(parsed.mode, TranslationMode::Fast);
    assert_eq!(parsed.model, config.model);
}

#[test]
fn test_config_fromPartialJson_shouldFillDefaults() {
    let parsed: Config = serde_json::from_str(r#"{"target_language":"es"}"#).unwrap();

    assert_eq!(parsed.target_language, TargetLanguage::Es);
    assert_eq!(parsed.max_entries_per_batch, 25);
    assert_eq!(parsed.model, "gemini-2.0-flash");
}

#[test]
fn test_target_language_fromStr_shouldAcceptClosedSetOnly() {
    assert_eq!(TargetLanguage::from_str("vi").unwrap(), TargetLanguage::Vi);
    assert_eq!(TargetLanguage::from_str("EN").unwrap(), TargetLanguage::En);
    assert!(matches!(
        TargetLanguage::from_str("de"),
        Err(ConfigError::UnknownLanguage(_))
    ));
}

#[test]
fn test_translation_mode_fromStr_shouldParseKebabCase() {
    assert_eq!(
        TranslationMode::from_str("smooth-humorous").unwrap(),
        TranslationMode::SmoothHumorous
    );
    assert_eq!(TranslationMode::from_str("fast").unwrap(), TranslationMode::Fast);
    assert!(matches!(
        TranslationMode::from_str("silly"),
        Err(ConfigError::UnknownMode(_))
    ));
}

#[test]
fn test_credential_store_saveAndLoad_shouldRoundTrip() {
    let dir = tempfile::tempdir().unwrap();
    let store = CredentialStore::at_path(dir.path().join("credentials.json"));

    assert_eq!(store.load(), None);

    store.save("secret-key").unwrap();
    assert_eq!(store.load(), Some("secret-key".to_string()));
}

#[test]
fn test_credential_store_resolve_shouldPreferExplicitKey() {
    let dir = tempfile::tempdir().unwrap();
    let store = CredentialStore::at_path(dir.path().join("credentials.json"));
    store.save("stored-key").unwrap();

    assert_eq!(
        store.resolve(Some("cli-key".to_string())).unwrap(),
        "cli-key"
    );
    assert_eq!(store.resolve(None).unwrap(), "stored-key");
    // Blank explicit keys fall through to the store
    assert_eq!(store.resolve(Some("  ".to_string())).unwrap(), "stored-key");
}

#[test]
fn test_credential_store_resolve_withNothingAvailable_shouldFail() {
    let dir = tempfile::tempdir().unwrap();
    let store = CredentialStore::at_path(dir.path().join("credentials.json"));

    assert!(matches!(store.resolve(None), Err(ConfigError::MissingApiKey)));
}
