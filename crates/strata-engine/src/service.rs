// SPDX-FileCopyrightText: 2026 Strata Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! High-level inference service over the orchestrator.
//!
//! Adds light prompt shaping on top of [`Orchestrator`]: a domain-specific
//! expert framing chosen from the request's product context, plus use-case
//! convenience entry points.

use strata_config::UseCase;
use strata_core::OrchestrationResult;

use crate::orchestrator::{OrchestrationRequest, Orchestrator};

/// Expert framings prepended per product context.
const CONTEXT_INTROS: &[(&str, &str)] = &[
    ("content", "As an expert content creator, "),
    ("product-strategy", "As a product strategy expert, "),
    ("affiliate", "As an affiliate marketing expert, "),
    ("email", "As an email marketing expert, "),
    ("niche-research", "As a market research expert, "),
    ("seo", "As an SEO expert, "),
];

/// A service-level request carrying optional product context for prompt
/// shaping.
#[derive(Debug, Clone)]
pub struct ServiceRequest {
    pub prompt: String,
    pub system_prompt: Option<String>,
    pub use_case: Option<UseCase>,
    /// Domain hint selecting an expert framing, e.g. `"seo"` or `"email"`.
    pub product_context: Option<String>,
    pub request_id: Option<String>,
}

impl ServiceRequest {
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            system_prompt: None,
            use_case: None,
            product_context: None,
            request_id: None,
        }
    }

    pub fn with_context(mut self, product_context: impl Into<String>) -> Self {
        self.product_context = Some(product_context.into());
        self
    }

    pub fn with_use_case(mut self, use_case: UseCase) -> Self {
        self.use_case = Some(use_case);
        self
    }
}

/// Orchestrator facade with prompt optimization and per-use-case shortcuts.
pub struct InferenceService {
    orchestrator: Orchestrator,
}

impl InferenceService {
    pub fn new(orchestrator: Orchestrator) -> Self {
        Self { orchestrator }
    }

    /// Processes a service request, shaping the prompt first.
    pub async fn generate(&self, request: ServiceRequest) -> OrchestrationResult {
        let prompt = optimize_prompt(&request.prompt, request.product_context.as_deref());
        let inner = OrchestrationRequest {
            prompt,
            system_prompt: request.system_prompt,
            use_case: request.use_case,
            request_id: request.request_id,
        };
        self.orchestrator.process(inner).await
    }

    /// Generation tuned for minimum latency.
    pub async fn optimize_for_speed(&self, prompt: impl Into<String>) -> OrchestrationResult {
        self.generate(ServiceRequest::new(prompt).with_use_case(UseCase::Speed))
            .await
    }

    /// Generation tuned for maximum output quality.
    pub async fn optimize_for_quality(&self, prompt: impl Into<String>) -> OrchestrationResult {
        self.generate(ServiceRequest::new(prompt).with_use_case(UseCase::Quality))
            .await
    }

    /// Generation tuned for multi-step reasoning.
    pub async fn optimize_for_reasoning(&self, prompt: impl Into<String>) -> OrchestrationResult {
        self.generate(ServiceRequest::new(prompt).with_use_case(UseCase::Reasoning))
            .await
    }
}

/// Shapes a raw prompt: expert framing from the product context, and an
/// imperative lead-in when the prompt has none.
///
/// Idempotent in practice: prompts that already start with an expert
/// framing or an imperative verb pass through unchanged.
pub fn optimize_prompt(prompt: &str, product_context: Option<&str>) -> String {
    let trimmed = prompt.trim();
    let already_framed = trimmed.starts_with("As a") || trimmed.starts_with("As an");
    let mut shaped = String::new();

    if let Some(context) = product_context {
        if let Some((_, intro)) = CONTEXT_INTROS.iter().find(|(key, _)| *key == context) {
            if !already_framed {
                shaped.push_str(intro);
            }
        }
    }

    let has_imperative = ["Please", "Create", "Generate"]
        .iter()
        .any(|lead| trimmed.starts_with(lead));
    if shaped.is_empty() && !has_imperative && !already_framed {
        shaped.push_str("Please ");
    }

    shaped.push_str(trimmed);
    shaped
}
