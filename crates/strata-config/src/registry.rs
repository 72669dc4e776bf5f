// SPDX-FileCopyrightText: 2026 Strata Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Canonical orchestration profiles and the startup-derived layer set.
//!
//! The registry is the static configuration source for the orchestrator:
//! it exposes the four canonical use-case profiles (speed, quality,
//! reasoning, balanced) and the set of layers enabled by the provider
//! credentials present at process start. Read-only after construction,
//! safe for unsynchronized concurrent reads.

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use strata_core::{BackendProfile, ProviderId, StrataError};
use strum::{Display, EnumString};
use tracing::info;

use crate::model::StrataConfig;

/// Layer name reported in results for the speed tier.
pub const SPEED_LAYER: &str = "Speed Layer";
/// Layer name reported in results for the quality tier.
pub const QUALITY_LAYER: &str = "Quality Layer";
/// Layer name reported in results for the reasoning tier.
pub const REASONING_LAYER: &str = "Reasoning Layer";

/// Named use-case bundles selectable per request.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum UseCase {
    Speed,
    Quality,
    Reasoning,
    Balanced,
}

/// The role a layer plays in strategy selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, Serialize, Deserialize)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum LayerPurpose {
    Speed,
    Quality,
    Reasoning,
}

/// A named, weighted role binding a purpose to one backend configuration.
///
/// `enabled` reflects whether the backing provider's credentials were
/// configured at process start. Layers are read-only after initialization.
#[derive(Debug, Clone)]
pub struct Layer {
    pub name: &'static str,
    pub purpose: LayerPurpose,
    pub backend: BackendProfile,
    pub weight: f64,
    pub enabled: bool,
}

/// The fixed set of layers available to the strategy selector.
#[derive(Debug, Clone)]
pub struct LayerSet {
    layers: Vec<Layer>,
}

impl LayerSet {
    /// Looks up the enabled layer with the given purpose, if any.
    pub fn enabled(&self, purpose: LayerPurpose) -> Option<&Layer> {
        self.layers
            .iter()
            .find(|l| l.purpose == purpose && l.enabled)
    }

    /// Number of layers currently enabled.
    pub fn enabled_count(&self) -> usize {
        self.layers.iter().filter(|l| l.enabled).count()
    }
}

/// A named bundle of policy choices selected once per request by caller
/// intent and never mutated afterward.
#[derive(Debug, Clone)]
pub struct OrchestrationProfile {
    pub use_case: UseCase,
    pub primary: BackendProfile,
    pub secondary: Option<BackendProfile>,
    /// Quality gate threshold in `[0, 1]`.
    pub quality_threshold: f64,
    pub enable_fallback: bool,
    pub enable_quality_scoring: bool,
    /// Budget for the whole execution, in milliseconds.
    pub max_latency_ms: u64,
    pub parallel: bool,
    pub cache_enabled: bool,
}

/// Static source of the canonical profiles and the enabled layer set.
#[derive(Debug, Clone)]
pub struct ProfileRegistry {
    layers: LayerSet,
    openai: crate::model::OpenAiConfig,
    anthropic: crate::model::AnthropicConfig,
    default_use_case: UseCase,
    parallel_processing: bool,
}

impl ProfileRegistry {
    /// Builds the registry from loaded configuration.
    ///
    /// Layer enablement is derived from which provider credentials are
    /// present: the OpenAI key gates the Speed and Quality layers, the
    /// Anthropic key gates the Reasoning layer.
    pub fn from_config(config: &StrataConfig) -> Result<Self, StrataError> {
        let default_use_case = UseCase::from_str(&config.orchestrator.default_use_case)
            .map_err(|_| {
                StrataError::Config(format!(
                    "orchestrator.default_use_case `{}` is not a known use case",
                    config.orchestrator.default_use_case
                ))
            })?;

        let openai_enabled = config.openai.api_key.is_some();
        let anthropic_enabled = config.anthropic.api_key.is_some();

        let layers = LayerSet {
            layers: vec![
                Layer {
                    name: SPEED_LAYER,
                    purpose: LayerPurpose::Speed,
                    backend: speed_backend(&config.openai),
                    weight: 0.2,
                    enabled: openai_enabled,
                },
                Layer {
                    name: QUALITY_LAYER,
                    purpose: LayerPurpose::Quality,
                    backend: quality_backend(&config.openai),
                    weight: 0.5,
                    enabled: openai_enabled,
                },
                Layer {
                    name: REASONING_LAYER,
                    purpose: LayerPurpose::Reasoning,
                    backend: reasoning_backend(&config.anthropic),
                    weight: 0.3,
                    enabled: anthropic_enabled,
                },
            ],
        };

        info!(
            enabled_layers = layers.enabled_count(),
            default_use_case = %default_use_case,
            "profile registry initialized"
        );

        Ok(Self {
            layers,
            openai: config.openai.clone(),
            anthropic: config.anthropic.clone(),
            default_use_case,
            parallel_processing: config.orchestrator.parallel_processing,
        })
    }

    /// The layer set derived at startup.
    pub fn layers(&self) -> &LayerSet {
        &self.layers
    }

    /// Use case applied when a request does not name one.
    pub fn default_use_case(&self) -> UseCase {
        self.default_use_case
    }

    /// The canonical profile for a use case.
    pub fn profile(&self, use_case: UseCase) -> OrchestrationProfile {
        let base = OrchestrationProfile {
            use_case,
            primary: quality_backend(&self.openai),
            secondary: None,
            quality_threshold: 0.8,
            enable_fallback: true,
            enable_quality_scoring: true,
            max_latency_ms: 8_000,
            parallel: self.parallel_processing,
            cache_enabled: true,
        };

        match use_case {
            UseCase::Speed => OrchestrationProfile {
                primary: speed_backend(&self.openai),
                quality_threshold: 0.6,
                max_latency_ms: 3_000,
                ..base
            },
            UseCase::Quality => OrchestrationProfile {
                primary: quality_backend(&self.openai),
                secondary: Some(reasoning_backend(&self.anthropic)),
                quality_threshold: 0.9,
                max_latency_ms: 15_000,
                ..base
            },
            UseCase::Reasoning => OrchestrationProfile {
                primary: reasoning_backend(&self.anthropic),
                secondary: Some(quality_backend(&self.openai)),
                quality_threshold: 0.85,
                max_latency_ms: 20_000,
                ..base
            },
            UseCase::Balanced => OrchestrationProfile {
                secondary: Some(BackendProfile {
                    temperature: 0.5,
                    ..speed_backend(&self.openai)
                }),
                ..base
            },
        }
    }
}

fn speed_backend(openai: &crate::model::OpenAiConfig) -> BackendProfile {
    BackendProfile {
        provider: ProviderId::OpenAi,
        model: openai.fast_model.clone(),
        temperature: 0.3,
        max_tokens: 2000,
    }
}

fn quality_backend(openai: &crate::model::OpenAiConfig) -> BackendProfile {
    BackendProfile {
        provider: ProviderId::OpenAi,
        model: openai.quality_model.clone(),
        temperature: 0.7,
        max_tokens: 2000,
    }
}

fn reasoning_backend(anthropic: &crate::model::AnthropicConfig) -> BackendProfile {
    BackendProfile {
        provider: ProviderId::Anthropic,
        model: anthropic.model.clone(),
        temperature: 0.6,
        max_tokens: 2000,
    }
}
