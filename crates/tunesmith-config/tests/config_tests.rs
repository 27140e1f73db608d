// SPDX-FileCopyrightText: 2026 Tunesmith Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Integration tests for the Tunesmith configuration system.

use tunesmith_config::diagnostic::{figment_to_config_errors, suggest_key, ConfigError};
use tunesmith_config::{load_and_validate_str, load_config_from_str};

/// Valid TOML with all known fields deserializes successfully.
#[test]
fn valid_toml_deserializes_into_tunesmith_config() {
    let toml = r#"
[optimizer]
cache_ttl_secs = 60
cache_max_entries = 10

[history]
patterns_path = "/tmp/patterns.json"
flush_every = 3
bootstrap_session_limit = 25
"#;

    let config = load_config_from_str(toml).expect("valid TOML should deserialize");
    assert_eq!(config.optimizer.cache_ttl_secs, 60);
    assert_eq!(config.optimizer.cache_max_entries, 10);
    assert_eq!(config.history.patterns_path, "/tmp/patterns.json");
    assert_eq!(config.history.flush_every, 3);
    assert_eq!(config.history.bootstrap_session_limit, 25);
}

/// Empty TOML uses compiled defaults without error.
#[test]
fn empty_toml_uses_defaults() {
    let config = load_config_from_str("").expect("empty TOML should use defaults");
    assert_eq!(config.optimizer.cache_ttl_secs, 300);
    assert_eq!(config.optimizer.cache_max_entries, 100);
    assert_eq!(config.history.patterns_path, "tunesmith_patterns.json");
    assert_eq!(config.history.flush_every, 5);
    assert_eq!(config.history.bootstrap_session_limit, 50);
}

/// Unknown field in [optimizer] section is rejected.
#[test]
fn unknown_field_in_optimizer_produces_error() {
    let toml = r#"
[optimizer]
cache_tl_secs = 60
"#;

    let err = load_config_from_str(toml).expect_err("should reject unknown field");
    let err_str = format!("{err}");
    assert!(
        err_str.contains("unknown field") || err_str.contains("cache_tl_secs"),
        "error should mention unknown field or the bad key, got: {err_str}"
    );
}

/// Unknown keys produce an UnknownKey diagnostic with a suggestion.
#[test]
fn unknown_key_diagnostic_carries_suggestion() {
    let toml = r#"
[history]
flush_evry = 3
"#;

    let err = load_config_from_str(toml).expect_err("should reject unknown field");
    let errors = figment_to_config_errors(err, &[("<inline>".to_string(), toml.to_string())]);
    assert!(!errors.is_empty());
    match &errors[0] {
        ConfigError::UnknownKey {
            key, suggestion, ..
        } => {
            assert_eq!(key, "flush_evry");
            assert_eq!(suggestion.as_deref(), Some("flush_every"));
        }
        other => panic!("expected UnknownKey, got: {other}"),
    }
}

/// Wrong value types carry a source span pointing at the offending key,
/// just like unknown keys do.
#[test]
fn invalid_type_diagnostic_carries_source_span() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("tunesmith.toml");
    let toml = "[optimizer]\ncache_ttl_secs = \"soon\"\n";
    std::fs::write(&path, toml).unwrap();

    let err = tunesmith_config::load_config_from_path(&path)
        .expect_err("should reject string for u64");
    let sources = vec![(path.display().to_string(), toml.to_string())];
    let errors = figment_to_config_errors(err, &sources);
    assert!(!errors.is_empty());
    match &errors[0] {
        ConfigError::InvalidType { key, span, src, .. } => {
            assert!(key.ends_with("cache_ttl_secs"), "key was: {key}");
            assert!(span.is_some(), "type errors should carry a source span");
            assert!(src.is_some());
        }
        other => panic!("expected InvalidType, got: {other}"),
    }
}

/// Wrong value type is rejected.
#[test]
fn invalid_type_produces_error() {
    let toml = r#"
[optimizer]
cache_ttl_secs = "soon"
"#;

    let err = load_config_from_str(toml).expect_err("should reject string for u64");
    let err_str = format!("{err}");
    assert!(
        err_str.contains("invalid type") || err_str.contains("expected"),
        "error should mention type mismatch, got: {err_str}"
    );
}

/// Validation catches semantically invalid values after deserialization.
#[test]
fn validation_rejects_zero_ttl() {
    let toml = r#"
[optimizer]
cache_ttl_secs = 0
"#;

    let errors = load_and_validate_str(toml).expect_err("zero TTL should fail validation");
    assert!(errors
        .iter()
        .any(|e| e.to_string().contains("cache_ttl_secs")));
}

/// Validation collects every problem in one pass.
#[test]
fn validation_collects_multiple_errors() {
    let toml = r#"
[optimizer]
cache_ttl_secs = 0
cache_max_entries = 0

[history]
patterns_path = ""
"#;

    let errors = load_and_validate_str(toml).expect_err("should fail validation");
    assert!(errors.len() >= 3, "expected >= 3 errors, got {}", errors.len());
}

/// Fuzzy suggestions surface the closest valid key.
#[test]
fn suggest_key_finds_close_match() {
    let valid = &["cache_ttl_secs", "cache_max_entries"];
    assert_eq!(
        suggest_key("cache_max_entires", valid),
        Some("cache_max_entries".to_string())
    );
    assert_eq!(suggest_key("totally_unrelated", valid), None);
}

/// Partial sections keep defaults for unspecified fields.
#[test]
fn partial_section_keeps_other_defaults() {
    let toml = r#"
[history]
flush_every = 2
"#;

    let config = load_config_from_str(toml).expect("should deserialize");
    assert_eq!(config.history.flush_every, 2);
    assert_eq!(config.history.patterns_path, "tunesmith_patterns.json");
    assert_eq!(config.optimizer.cache_ttl_secs, 300);
}
