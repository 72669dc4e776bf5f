// SPDX-FileCopyrightText: 2026 Strata Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs for the Strata orchestration core.
//!
//! All structs use `#[serde(deny_unknown_fields)]` to reject unrecognized
//! config keys at startup, providing actionable error messages.

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use strata_core::{BackendProfile, ProviderId, StrataError};

/// Top-level Strata configuration.
///
/// Loaded from TOML files following XDG hierarchy, with environment variable
/// overrides. All sections are optional and default to sensible values.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct StrataConfig {
    /// Orchestrator behavior settings.
    #[serde(default)]
    pub orchestrator: OrchestratorConfig,

    /// OpenAI API settings.
    #[serde(default)]
    pub openai: OpenAiConfig,

    /// Anthropic API settings.
    #[serde(default)]
    pub anthropic: AnthropicConfig,

    /// Quality scoring settings.
    #[serde(default)]
    pub scoring: ScoringConfig,
}

/// Orchestrator behavior configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct OrchestratorConfig {
    /// Use case applied when a request does not name one
    /// (speed, quality, reasoning, balanced).
    #[serde(default = "default_use_case")]
    pub default_use_case: String,

    /// Logging level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Issue planned backend calls concurrently where the strategy allows it.
    #[serde(default)]
    pub parallel_processing: bool,
}

impl Default for OrchestratorConfig {
    fn default() -> Self {
        Self {
            default_use_case: default_use_case(),
            log_level: default_log_level(),
            parallel_processing: false,
        }
    }
}

fn default_use_case() -> String {
    "balanced".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

/// OpenAI API configuration.
///
/// The Speed and Quality layers are enabled only when `api_key` is set.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct OpenAiConfig {
    /// OpenAI API key. `None` disables OpenAI-backed layers.
    #[serde(default)]
    pub api_key: Option<String>,

    /// Base URL for the Chat Completions API.
    #[serde(default = "default_openai_base_url")]
    pub base_url: String,

    /// Model used by the Speed layer and other low-cost calls.
    #[serde(default = "default_fast_model")]
    pub fast_model: String,

    /// Model used by the Quality layer.
    #[serde(default = "default_quality_model")]
    pub quality_model: String,
}

impl Default for OpenAiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_openai_base_url(),
            fast_model: default_fast_model(),
            quality_model: default_quality_model(),
        }
    }
}

fn default_openai_base_url() -> String {
    "https://api.openai.com/v1".to_string()
}

fn default_fast_model() -> String {
    "gpt-4o-mini".to_string()
}

fn default_quality_model() -> String {
    "gpt-4o".to_string()
}

/// Anthropic API configuration.
///
/// The Reasoning layer is enabled only when `api_key` is set.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct AnthropicConfig {
    /// Anthropic API key. `None` disables the Reasoning layer.
    #[serde(default)]
    pub api_key: Option<String>,

    /// Base URL for the Messages API.
    #[serde(default = "default_anthropic_base_url")]
    pub base_url: String,

    /// Model used by the Reasoning layer.
    #[serde(default = "default_reasoning_model")]
    pub model: String,

    /// Anthropic API version string.
    #[serde(default = "default_api_version")]
    pub api_version: String,
}

impl Default for AnthropicConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_anthropic_base_url(),
            model: default_reasoning_model(),
            api_version: default_api_version(),
        }
    }
}

fn default_anthropic_base_url() -> String {
    "https://api.anthropic.com/v1".to_string()
}

fn default_reasoning_model() -> String {
    "claude-3-5-sonnet-20241022".to_string()
}

fn default_api_version() -> String {
    "2023-06-01".to_string()
}

/// Quality scoring configuration.
///
/// The scorer issues one cheap backend call per scored result; it is
/// advisory and degrades to `default_score` on any failure.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ScoringConfig {
    /// Provider serving the scoring call (openai or anthropic).
    #[serde(default = "default_scoring_provider")]
    pub provider: String,

    /// Model used for the scoring call.
    #[serde(default = "default_fast_model")]
    pub model: String,

    /// Sampling temperature for the scoring call. Zero keeps ratings stable.
    #[serde(default)]
    pub temperature: f32,

    /// Max tokens for the scoring call; a single decimal needs very few.
    #[serde(default = "default_scoring_max_tokens")]
    pub max_tokens: u32,

    /// Score reported when scoring is disabled or degraded (0.0-1.0).
    #[serde(default = "default_quality_score")]
    pub default_score: f64,

    /// Content is truncated to this many characters before scoring.
    #[serde(default = "default_max_content_chars")]
    pub max_content_chars: usize,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            provider: default_scoring_provider(),
            model: default_fast_model(),
            temperature: 0.0,
            max_tokens: default_scoring_max_tokens(),
            default_score: default_quality_score(),
            max_content_chars: default_max_content_chars(),
        }
    }
}

impl ScoringConfig {
    /// Backend profile for the scoring call.
    pub fn backend_profile(&self) -> Result<BackendProfile, StrataError> {
        let provider = ProviderId::from_str(&self.provider).map_err(|_| {
            StrataError::Config(format!(
                "scoring.provider `{}` is not a known provider",
                self.provider
            ))
        })?;
        Ok(BackendProfile {
            provider,
            model: self.model.clone(),
            temperature: self.temperature,
            max_tokens: self.max_tokens,
        })
    }
}

fn default_scoring_provider() -> String {
    "openai".to_string()
}

fn default_scoring_max_tokens() -> u32 {
    8
}

fn default_quality_score() -> f64 {
    0.75
}

fn default_max_content_chars() -> usize {
    1000
}
