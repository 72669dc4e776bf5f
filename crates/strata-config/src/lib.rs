// SPDX-FileCopyrightText: 2026 Strata Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration system for the Strata orchestration core.
//!
//! Provides TOML configuration parsing with strict validation
//! (`deny_unknown_fields`), XDG file hierarchy lookup, environment variable
//! overrides, miette diagnostics with typo suggestions, and the profile
//! registry exposing the canonical use-case profiles and the credential-
//! derived layer set.
//!
//! # Usage
//!
//! ```no_run
//! use strata_config::{ProfileRegistry, load_and_validate};
//!
//! let config = load_and_validate().expect("config errors");
//! let registry = ProfileRegistry::from_config(&config).expect("registry");
//! ```

pub mod diagnostic;
pub mod loader;
pub mod model;
pub mod registry;
pub mod validation;

pub use diagnostic::{ConfigError, render_errors};
pub use loader::{load_config, load_config_from_path, load_config_from_str};
pub use model::{AnthropicConfig, OpenAiConfig, OrchestratorConfig, ScoringConfig, StrataConfig};
pub use registry::{
    Layer, LayerPurpose, LayerSet, OrchestrationProfile, ProfileRegistry, UseCase,
};

/// Load configuration from the XDG hierarchy and validate it.
///
/// This is the high-level entry point that:
/// 1. Loads config from TOML files + env vars via Figment
/// 2. On success: runs post-deserialization validation
/// 3. On Figment error: converts to miette diagnostics with typo suggestions
pub fn load_and_validate() -> Result<StrataConfig, Vec<ConfigError>> {
    match loader::load_config() {
        Ok(config) => {
            validation::validate_config(&config)?;
            Ok(config)
        }
        Err(err) => Err(diagnostic::figment_to_config_errors(err)),
    }
}

/// Load configuration from a TOML string and validate it.
///
/// Useful for testing and explicit configuration.
pub fn load_and_validate_str(toml_content: &str) -> Result<StrataConfig, Vec<ConfigError>> {
    match loader::load_config_from_str(toml_content) {
        Ok(config) => {
            validation::validate_config(&config)?;
            Ok(config)
        }
        Err(err) => Err(diagnostic::figment_to_config_errors(err)),
    }
}
