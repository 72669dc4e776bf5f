// SPDX-FileCopyrightText: 2026 Strata Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Supports XDG hierarchy: `./strata.toml` > `~/.config/strata/strata.toml` >
//! `/etc/strata/strata.toml` with environment variable overrides via the
//! `STRATA_` prefix.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::Path;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};

use crate::model::StrataConfig;

/// Load configuration from the standard XDG hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/strata/strata.toml` (system-wide)
/// 3. `~/.config/strata/strata.toml` (user XDG config)
/// 4. `./strata.toml` (local directory)
/// 5. `STRATA_*` environment variables
pub fn load_config() -> Result<StrataConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(StrataConfig::default()))
        .merge(Toml::file("/etc/strata/strata.toml"))
        .merge(Toml::file(
            dirs::config_dir()
                .map(|d| d.join("strata/strata.toml"))
                .unwrap_or_default(),
        ))
        .merge(Toml::file("strata.toml"))
        .merge(env_provider())
        .extract()
}

/// Load configuration from a TOML string only (no XDG lookup, no env vars).
///
/// Used for testing and explicit configuration.
pub fn load_config_from_str(toml_content: &str) -> Result<StrataConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(StrataConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from a specific file path with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<StrataConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(StrataConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// Create the environment variable provider using explicit `map()` for
/// section-to-dot mapping.
///
/// Uses `Env::map()` NOT `Env::split("_")` to avoid ambiguity with
/// underscore-containing key names: `STRATA_OPENAI_API_KEY` must map to
/// `openai.api_key`, not `openai.api.key`.
fn env_provider() -> Env {
    Env::prefixed("STRATA_").map(|key| {
        let key_str = key.as_str();
        let mapped = key_str
            .replacen("orchestrator_", "orchestrator.", 1)
            .replacen("openai_", "openai.", 1)
            .replacen("anthropic_", "anthropic.", 1)
            .replacen("scoring_", "scoring.", 1);
        mapped.into()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_string_yields_defaults() {
        let config = load_config_from_str("").unwrap();
        assert_eq!(config.orchestrator.default_use_case, "balanced");
        assert!(config.openai.api_key.is_none());
    }

    #[test]
    fn toml_string_overrides_defaults() {
        let config = load_config_from_str(
            r#"
[orchestrator]
default_use_case = "reasoning"

[anthropic]
api_key = "ak-test"
model = "claude-3-5-haiku-20241022"
"#,
        )
        .unwrap();
        assert_eq!(config.orchestrator.default_use_case, "reasoning");
        assert_eq!(config.anthropic.api_key.as_deref(), Some("ak-test"));
        assert_eq!(config.anthropic.model, "claude-3-5-haiku-20241022");
        // Untouched sections keep defaults.
        assert_eq!(config.scoring.default_score, 0.75);
    }

    #[test]
    fn unknown_key_fails_extraction() {
        let result = load_config_from_str(
            r#"
[scoring]
default_scroe = 0.5
"#,
        );
        assert!(result.is_err());
    }
}
