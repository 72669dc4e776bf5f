// SPDX-FileCopyrightText: 2026 Strata Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.
//!
//! Validates semantic constraints that cannot be expressed via serde
//! attributes, such as threshold ranges and known enum values.

use std::str::FromStr;

use strata_core::ProviderId;

use crate::diagnostic::ConfigError;
use crate::model::StrataConfig;
use crate::registry::UseCase;

const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// Validate a deserialized configuration for semantic correctness.
///
/// Returns `Ok(())` if all validations pass, or `Err(Vec<ConfigError>)` with
/// all collected validation errors (does not fail fast).
pub fn validate_config(config: &StrataConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    if UseCase::from_str(&config.orchestrator.default_use_case).is_err() {
        errors.push(ConfigError::Validation {
            message: format!(
                "orchestrator.default_use_case `{}` must be one of speed, quality, reasoning, balanced",
                config.orchestrator.default_use_case
            ),
        });
    }

    if !LOG_LEVELS.contains(&config.orchestrator.log_level.as_str()) {
        errors.push(ConfigError::Validation {
            message: format!(
                "orchestrator.log_level `{}` must be one of {}",
                config.orchestrator.log_level,
                LOG_LEVELS.join(", ")
            ),
        });
    }

    if config.openai.base_url.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "openai.base_url must not be empty".to_string(),
        });
    }

    if config.anthropic.base_url.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "anthropic.base_url must not be empty".to_string(),
        });
    }

    if ProviderId::from_str(&config.scoring.provider).is_err() {
        errors.push(ConfigError::Validation {
            message: format!(
                "scoring.provider `{}` must be one of openai, anthropic",
                config.scoring.provider
            ),
        });
    }

    if !(0.0..=1.0).contains(&config.scoring.default_score) {
        errors.push(ConfigError::Validation {
            message: format!(
                "scoring.default_score must be within 0.0-1.0, got {}",
                config.scoring.default_score
            ),
        });
    }

    if !(0.0..=2.0).contains(&config.scoring.temperature) {
        errors.push(ConfigError::Validation {
            message: format!(
                "scoring.temperature must be within 0.0-2.0, got {}",
                config.scoring.temperature
            ),
        });
    }

    if config.scoring.max_content_chars == 0 {
        errors.push(ConfigError::Validation {
            message: "scoring.max_content_chars must be greater than zero".to_string(),
        });
    }

    if errors.is_empty() { Ok(()) } else { Err(errors) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_validates() {
        let config = StrataConfig::default();
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn bad_use_case_fails_validation() {
        let mut config = StrataConfig::default();
        config.orchestrator.default_use_case = "turbo".to_string();
        let errors = validate_config(&config).unwrap_err();
        assert!(errors.iter().any(
            |e| matches!(e, ConfigError::Validation { message } if message.contains("default_use_case"))
        ));
    }

    #[test]
    fn out_of_range_default_score_fails_validation() {
        let mut config = StrataConfig::default();
        config.scoring.default_score = 1.5;
        let errors = validate_config(&config).unwrap_err();
        assert!(errors.iter().any(
            |e| matches!(e, ConfigError::Validation { message } if message.contains("default_score"))
        ));
    }

    #[test]
    fn unknown_scoring_provider_fails_validation() {
        let mut config = StrataConfig::default();
        config.scoring.provider = "cohere".to_string();
        let errors = validate_config(&config).unwrap_err();
        assert!(errors.iter().any(
            |e| matches!(e, ConfigError::Validation { message } if message.contains("scoring.provider"))
        ));
    }

    #[test]
    fn collects_multiple_errors() {
        let mut config = StrataConfig::default();
        config.orchestrator.log_level = "loud".to_string();
        config.scoring.max_content_chars = 0;
        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 2);
    }
}
