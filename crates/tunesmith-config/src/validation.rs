// SPDX-FileCopyrightText: 2026 Tunesmith Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.
//!
//! Validates semantic constraints that cannot be expressed via serde
//! attributes. Collects all errors rather than failing fast.

use crate::diagnostic::ConfigError;
use crate::model::TunesmithConfig;

/// Validate a deserialized configuration for semantic correctness.
pub fn validate_config(config: &TunesmithConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    if config.optimizer.cache_ttl_secs == 0 {
        errors.push(ConfigError::Validation {
            message: "optimizer.cache_ttl_secs must be at least 1".to_string(),
        });
    }

    if config.optimizer.cache_max_entries == 0 {
        errors.push(ConfigError::Validation {
            message: "optimizer.cache_max_entries must be at least 1".to_string(),
        });
    }

    if config.history.patterns_path.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "history.patterns_path must not be empty".to_string(),
        });
    }

    if config.history.flush_every == 0 {
        errors.push(ConfigError::Validation {
            message: "history.flush_every must be at least 1".to_string(),
        });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_validates() {
        assert!(validate_config(&TunesmithConfig::default()).is_ok());
    }

    #[test]
    fn zero_ttl_rejected() {
        let mut config = TunesmithConfig::default();
        config.optimizer.cache_ttl_secs = 0;
        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].to_string().contains("cache_ttl_secs"));
    }

    #[test]
    fn all_errors_collected() {
        let mut config = TunesmithConfig::default();
        config.optimizer.cache_ttl_secs = 0;
        config.optimizer.cache_max_entries = 0;
        config.history.patterns_path = "  ".to_string();
        config.history.flush_every = 0;
        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 4);
    }
}
