// SPDX-FileCopyrightText: 2026 Strata Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Common types shared across the Strata workspace.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Identifies a generative-model provider behind the uniform call contract.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ProviderId {
    OpenAi,
    Anthropic,
}

/// Immutable description of one callable backend configuration.
///
/// Owned by configuration; execution plans reference profiles by value
/// and never mutate them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BackendProfile {
    /// Which provider serves this backend.
    pub provider: ProviderId,
    /// Provider-specific model identifier.
    pub model: String,
    /// Sampling temperature for generation.
    pub temperature: f32,
    /// Maximum tokens to generate per response.
    pub max_tokens: u32,
}

/// Token counts reported by a backend call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenUsage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
    pub total_tokens: u32,
}

/// A successful response from a backend call.
#[derive(Debug, Clone)]
pub struct CompletionResponse {
    /// Generated text content.
    pub content: String,
    /// Model that actually served the request.
    pub model: String,
    /// Token usage, when the provider reports it.
    pub usage: Option<TokenUsage>,
}

/// Coarse error classification surfaced to callers in results.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    Provider,
    Timeout,
    Parse,
    Internal,
}

/// Serializable error surfaced in an [`OrchestrationResult`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultError {
    pub kind: ErrorKind,
    pub message: String,
}

/// Estimated or observed latency/quality for one backend position in a plan.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LayerPerformance {
    pub latency_ms: u64,
    pub quality: f64,
}

/// Per-position performance figures for the backends a plan engaged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelPerformance {
    pub primary: LayerPerformance,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub secondary: Option<LayerPerformance>,
}

/// Derived efficiency metrics for a completed execution.
///
/// All values are clamped to `[0, 1]` and rounded to two decimals.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Optimization {
    pub token_efficiency: f64,
    pub cost_efficiency: f64,
    pub accuracy_score: f64,
}

impl Optimization {
    /// The zeroed metrics used on the bare-mode fallback path.
    pub fn zeroed() -> Self {
        Self {
            token_efficiency: 0.0,
            cost_efficiency: 0.0,
            accuracy_score: 0.0,
        }
    }
}

/// The unit returned to the caller for every orchestrated request.
///
/// Immutable once constructed. Either `content` or `error` is populated,
/// sufficient to render a message without leaking internal state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrchestrationResult {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ResultError>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub usage: Option<TokenUsage>,
    /// Always present; a fixed default when scoring is disabled or degraded.
    pub quality_score: f64,
    pub layers_used: Vec<String>,
    pub processing_time_ms: u64,
    pub model_performance: ModelPerformance,
    pub optimization: Optimization,
}
