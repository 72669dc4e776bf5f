// SPDX-FileCopyrightText: 2026 Strata Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Plan execution: sequential fallback chains and parallel racing, both
//! bounded by the profile's latency budget.
//!
//! Sequential mode walks the plan's backends in order and accepts the first
//! result that clears the quality gate. Parallel mode launches every backend
//! at once and takes the first acceptable completion, cancelling the rest.
//! Either way the whole execution races the latency budget; an elapsed
//! budget yields a timeout result, never a hang.

use std::sync::Arc;
use std::time::Duration;

use futures::stream::{FuturesUnordered, StreamExt};
use strata_config::OrchestrationProfile;
use strata_core::{BackendClient, BackendProfile, CompletionResponse, StrataError, TokenUsage};
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use crate::scorer::QualityScorer;
use crate::selector::ExecutionPlan;

/// Thresholds at or below this value accept any successful completion
/// without a scoring round-trip; stricter thresholds gate each candidate
/// on its computed score.
pub(crate) const LENIENT_QUALITY_THRESHOLD: f64 = 0.8;

/// Outcome of executing a plan, before scoring/metrics assembly.
#[derive(Debug)]
pub struct RawResult {
    pub success: bool,
    pub content: Option<String>,
    pub usage: Option<TokenUsage>,
    pub error: Option<StrataError>,
    /// Score already computed by the quality gate, reusable downstream to
    /// avoid rating the same content twice.
    pub gate_score: Option<f64>,
}

impl RawResult {
    fn accepted(response: CompletionResponse, gate_score: Option<f64>) -> Self {
        Self {
            success: true,
            content: Some(response.content),
            usage: response.usage,
            error: None,
            gate_score,
        }
    }

    fn failed(error: StrataError) -> Self {
        Self {
            success: false,
            content: None,
            usage: None,
            error: Some(error),
            gate_score: None,
        }
    }
}

/// Runs execution plans against a backend client.
pub struct ExecutionEngine {
    backend: Arc<dyn BackendClient>,
    scorer: QualityScorer,
}

impl ExecutionEngine {
    pub fn new(backend: Arc<dyn BackendClient>, scorer: QualityScorer) -> Self {
        Self { backend, scorer }
    }

    /// Executes the plan within the profile's latency budget.
    ///
    /// Always returns: success, a captured failure, or a timeout result
    /// when the budget elapses first.
    pub async fn execute(
        &self,
        plan: &ExecutionPlan,
        profile: &OrchestrationProfile,
        prompt: &str,
        system_prompt: Option<&str>,
    ) -> RawResult {
        let budget = Duration::from_millis(profile.max_latency_ms);
        let run = async {
            if plan.parallel && plan.backends.len() > 1 {
                self.run_parallel(plan, profile, prompt, system_prompt).await
            } else {
                self.run_sequential(plan, profile, prompt, system_prompt).await
            }
        };

        match tokio::time::timeout(budget, run).await {
            Ok(result) => result,
            Err(_) => {
                warn!(budget_ms = profile.max_latency_ms, "latency budget elapsed");
                RawResult::failed(StrataError::Timeout { duration: budget })
            }
        }
    }

    /// Walk the backends in order, accepting the first gate-passing success.
    ///
    /// The first failure is remembered as the primary error; later backends
    /// still run. If every candidate succeeds but none clears the gate, the
    /// best-scoring candidate is returned rather than an error.
    async fn run_sequential(
        &self,
        plan: &ExecutionPlan,
        profile: &OrchestrationProfile,
        prompt: &str,
        system_prompt: Option<&str>,
    ) -> RawResult {
        let gated = needs_gate(profile);
        let mut primary_error: Option<StrataError> = None;
        let mut best: Option<(f64, CompletionResponse)> = None;

        for (position, backend_profile) in plan.backends.iter().enumerate() {
            match self.call(backend_profile, prompt, system_prompt).await {
                Ok(response) => {
                    if !gated {
                        return RawResult::accepted(response, None);
                    }
                    let score = self.scorer.score(&response.content, prompt).await;
                    if score >= profile.quality_threshold {
                        return RawResult::accepted(response, Some(score));
                    }
                    debug!(
                        position,
                        score,
                        threshold = profile.quality_threshold,
                        "candidate below quality threshold, trying next backend"
                    );
                    if best.as_ref().is_none_or(|(s, _)| score > *s) {
                        best = Some((score, response));
                    }
                }
                Err(e) => {
                    warn!(position, error = %e, "backend call failed");
                    if primary_error.is_none() {
                        primary_error = Some(e);
                    }
                }
            }
        }

        if let Some((score, response)) = best {
            return RawResult::accepted(response, Some(score));
        }
        let error = primary_error
            .unwrap_or_else(|| StrataError::Internal("execution plan had no backends".into()));
        RawResult::failed(error)
    }

    /// Launch every backend at once and take the first acceptable completion.
    ///
    /// Remaining calls are cancelled once a winner is found. Losing by
    /// completion order is fine; losing candidates only matter when no
    /// completion clears the gate, in which case the best scorer wins. When
    /// everything fails, the error of the plan's earliest position is kept.
    async fn run_parallel(
        &self,
        plan: &ExecutionPlan,
        profile: &OrchestrationProfile,
        prompt: &str,
        system_prompt: Option<&str>,
    ) -> RawResult {
        let gated = needs_gate(profile);
        let token = CancellationToken::new();
        let mut in_flight: FuturesUnordered<_> = plan
            .backends
            .iter()
            .enumerate()
            .map(|(position, backend_profile)| {
                let token = token.clone();
                async move {
                    tokio::select! {
                        _ = token.cancelled() => None,
                        result = self.call(backend_profile, prompt, system_prompt) => {
                            Some((position, result))
                        }
                    }
                }
            })
            .collect();

        let mut best: Option<(f64, CompletionResponse)> = None;
        let mut errors: Vec<(usize, StrataError)> = Vec::new();

        while let Some(completed) = in_flight.next().await {
            let Some((position, result)) = completed else {
                continue;
            };
            match result {
                Ok(response) => {
                    if !gated {
                        token.cancel();
                        return RawResult::accepted(response, None);
                    }
                    let score = self.scorer.score(&response.content, prompt).await;
                    if score >= profile.quality_threshold {
                        token.cancel();
                        return RawResult::accepted(response, Some(score));
                    }
                    if best.as_ref().is_none_or(|(s, _)| score > *s) {
                        best = Some((score, response));
                    }
                }
                Err(e) => {
                    warn!(position, error = %e, "backend call failed");
                    errors.push((position, e));
                }
            }
        }

        if let Some((score, response)) = best {
            return RawResult::accepted(response, Some(score));
        }
        errors.sort_by_key(|(position, _)| *position);
        let error = errors
            .into_iter()
            .map(|(_, e)| e)
            .next()
            .unwrap_or_else(|| StrataError::Internal("execution plan had no backends".into()));
        RawResult::failed(error)
    }

    async fn call(
        &self,
        backend_profile: &BackendProfile,
        prompt: &str,
        system_prompt: Option<&str>,
    ) -> Result<CompletionResponse, StrataError> {
        debug!(
            provider = %backend_profile.provider,
            model = %backend_profile.model,
            "dispatching backend call"
        );
        self.backend
            .complete(backend_profile, prompt, system_prompt)
            .await
    }
}

/// Whether the profile's threshold is strict enough to gate candidates on
/// a computed score.
pub(crate) fn needs_gate(profile: &OrchestrationProfile) -> bool {
    profile.enable_quality_scoring && profile.quality_threshold > LENIENT_QUALITY_THRESHOLD
}
