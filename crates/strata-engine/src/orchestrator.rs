// SPDX-FileCopyrightText: 2026 Strata Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The orchestration boundary: one entry point, one result shape, no panics.
//!
//! [`Orchestrator::process`] runs the full pipeline (assess, select,
//! execute, score, derive metrics) and always returns an
//! [`OrchestrationResult`]. Backend failures and elapsed budgets are
//! handled by the execution engine and surface as failure results carrying
//! the primary error. Only an internal pipeline fault drops the
//! orchestrator to bare mode: a single direct call against the profile's
//! primary backend within whatever latency budget remains.

use std::sync::Arc;
use std::time::Duration;

use strata_config::{OrchestrationProfile, ProfileRegistry, ScoringConfig, UseCase};
use strata_core::{
    AnalyticsSink, BackendClient, LayerPerformance, ModelPerformance, Optimization,
    OrchestrationResult, ResultError, StrataError,
};
use tracing::{info, warn};
use uuid::Uuid;

use crate::assessor;
use crate::executor::ExecutionEngine;
use crate::optimizer;
use crate::scorer::QualityScorer;
use crate::selector::{self, FALLBACK_LAYER};

/// Quality score reported for bare-mode results.
const BARE_MODE_QUALITY: f64 = 0.5;

/// One orchestrated generation request.
#[derive(Debug, Clone)]
pub struct OrchestrationRequest {
    pub prompt: String,
    pub system_prompt: Option<String>,
    /// Overrides the configured default use case when set.
    pub use_case: Option<UseCase>,
    /// Correlation id for analytics; generated when absent.
    pub request_id: Option<String>,
}

impl OrchestrationRequest {
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            system_prompt: None,
            use_case: None,
            request_id: None,
        }
    }

    pub fn with_use_case(mut self, use_case: UseCase) -> Self {
        self.use_case = Some(use_case);
        self
    }

    pub fn with_system_prompt(mut self, system_prompt: impl Into<String>) -> Self {
        self.system_prompt = Some(system_prompt.into());
        self
    }
}

/// Coordinates the full pipeline behind a no-throw boundary.
pub struct Orchestrator {
    backend: Arc<dyn BackendClient>,
    registry: Arc<ProfileRegistry>,
    engine: ExecutionEngine,
    scorer: QualityScorer,
    sink: Option<Arc<dyn AnalyticsSink>>,
}

impl Orchestrator {
    /// Builds an orchestrator over the given backend client and registry.
    pub fn new(
        backend: Arc<dyn BackendClient>,
        registry: Arc<ProfileRegistry>,
        scoring: &ScoringConfig,
        sink: Option<Arc<dyn AnalyticsSink>>,
    ) -> Result<Self, StrataError> {
        let scorer = QualityScorer::new(Arc::clone(&backend), scoring)?;
        let engine = ExecutionEngine::new(Arc::clone(&backend), scorer.clone());
        Ok(Self {
            backend,
            registry,
            engine,
            scorer,
            sink,
        })
    }

    /// Processes one request end to end. Never fails and never panics;
    /// every outcome is an [`OrchestrationResult`].
    pub async fn process(&self, request: OrchestrationRequest) -> OrchestrationResult {
        let use_case = request.use_case.unwrap_or(self.registry.default_use_case());
        let profile = self.registry.profile(use_case);
        self.process_with_profile(request, profile).await
    }

    /// Like [`process`](Self::process), with an explicit profile instead of
    /// a registry lookup.
    pub async fn process_with_profile(
        &self,
        request: OrchestrationRequest,
        profile: OrchestrationProfile,
    ) -> OrchestrationResult {
        let started = tokio::time::Instant::now();
        let result = match self.run_pipeline(&request, &profile, started).await {
            Ok(result) => result,
            Err(e) => {
                warn!(error = %e, use_case = %profile.use_case, "pipeline failed, entering bare mode");
                self.bare_mode(&request, &profile, started).await
            }
        };

        info!(
            use_case = %profile.use_case,
            success = result.success,
            quality_score = result.quality_score,
            processing_time_ms = result.processing_time_ms,
            layers = ?result.layers_used,
            "request processed"
        );
        self.record(&request, &profile, &result).await;
        result
    }

    async fn run_pipeline(
        &self,
        request: &OrchestrationRequest,
        profile: &OrchestrationProfile,
        started: tokio::time::Instant,
    ) -> Result<OrchestrationResult, StrataError> {
        let assessment = assessor::assess(&request.prompt);
        let plan = selector::select(profile, &assessment, self.registry.layers());
        if plan.backends.is_empty() {
            return Err(StrataError::Internal("execution plan had no backends".into()));
        }

        let raw = self
            .engine
            .execute(&plan, profile, &request.prompt, request.system_prompt.as_deref())
            .await;

        let quality_score = if !profile.enable_quality_scoring {
            self.scorer.default_score()
        } else if let Some(score) = raw.gate_score {
            score
        } else if let Some(content) = raw.content.as_deref() {
            self.bounded_score(content, &request.prompt, profile, started).await
        } else {
            self.scorer.default_score()
        };

        let processing_time_ms = started.elapsed().as_millis() as u64;
        let optimization = optimizer::compute(
            raw.usage.as_ref(),
            processing_time_ms,
            raw.success,
            profile.max_latency_ms,
        );

        Ok(OrchestrationResult {
            success: raw.success,
            content: raw.content,
            error: raw.error.map(|e| ResultError {
                kind: e.kind(),
                message: e.to_string(),
            }),
            usage: raw.usage,
            quality_score,
            layers_used: plan.layer_names,
            processing_time_ms,
            model_performance: plan.performance_estimate,
            optimization,
        })
    }

    /// Rates content within whatever latency budget remains. A rating call
    /// that cannot finish in time degrades to the default score so the
    /// request still returns inside the budget.
    async fn bounded_score(
        &self,
        content: &str,
        prompt: &str,
        profile: &OrchestrationProfile,
        started: tokio::time::Instant,
    ) -> f64 {
        let remaining = remaining_budget(profile, started);
        match tokio::time::timeout(remaining, self.scorer.score(content, prompt)).await {
            Ok(score) => score,
            Err(_) => {
                warn!(
                    budget_ms = profile.max_latency_ms,
                    "quality rating exceeded the latency budget, using default score"
                );
                self.scorer.default_score()
            }
        }
    }

    /// Last-resort path for internal pipeline faults: one direct call to
    /// the profile's primary backend within the remaining latency budget.
    async fn bare_mode(
        &self,
        request: &OrchestrationRequest,
        profile: &OrchestrationProfile,
        started: tokio::time::Instant,
    ) -> OrchestrationResult {
        let budget = Duration::from_millis(profile.max_latency_ms);
        let remaining = remaining_budget(profile, started);

        let call = self.backend.complete(
            &profile.primary,
            &request.prompt,
            request.system_prompt.as_deref(),
        );
        let outcome = match tokio::time::timeout(remaining, call).await {
            Ok(result) => result,
            Err(_) => Err(StrataError::Timeout { duration: budget }),
        };

        let processing_time_ms = started.elapsed().as_millis() as u64;
        match outcome {
            Ok(response) => OrchestrationResult {
                success: true,
                content: Some(response.content),
                error: None,
                usage: response.usage,
                quality_score: BARE_MODE_QUALITY,
                layers_used: vec![FALLBACK_LAYER.to_string()],
                processing_time_ms,
                model_performance: bare_mode_performance(),
                optimization: Optimization::zeroed(),
            },
            Err(e) => {
                warn!(error = %e, "bare mode call failed");
                OrchestrationResult {
                    success: false,
                    content: None,
                    error: Some(ResultError {
                        kind: e.kind(),
                        message: e.to_string(),
                    }),
                    usage: None,
                    quality_score: BARE_MODE_QUALITY,
                    layers_used: vec![FALLBACK_LAYER.to_string()],
                    processing_time_ms,
                    model_performance: bare_mode_performance(),
                    optimization: Optimization::zeroed(),
                }
            }
        }
    }

    /// Reports the result to the analytics sink. Sink failures are logged
    /// and otherwise ignored.
    async fn record(
        &self,
        request: &OrchestrationRequest,
        profile: &OrchestrationProfile,
        result: &OrchestrationResult,
    ) {
        let Some(sink) = &self.sink else {
            return;
        };
        let request_id = request
            .request_id
            .clone()
            .unwrap_or_else(|| Uuid::new_v4().to_string());
        let metadata = serde_json::json!({
            "use_case": profile.use_case.to_string(),
            "model": profile.primary.model,
        });
        if let Err(e) = sink.record(&request_id, result, &metadata).await {
            warn!(error = %e, request_id, "analytics sink rejected record");
        }
    }
}

/// Latency budget still available for the request, at least 1 ms so a
/// bounded call is always attempted.
fn remaining_budget(profile: &OrchestrationProfile, started: tokio::time::Instant) -> Duration {
    Duration::from_millis(profile.max_latency_ms)
        .saturating_sub(started.elapsed())
        .max(Duration::from_millis(1))
}

fn bare_mode_performance() -> ModelPerformance {
    ModelPerformance {
        primary: LayerPerformance {
            latency_ms: 0,
            quality: BARE_MODE_QUALITY,
        },
        secondary: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strata_config::StrataConfig;
    use strata_core::ErrorKind;
    use strata_test_utils::{MockBackend, Outcome, RecordingSink};

    fn registry() -> Arc<ProfileRegistry> {
        let mut config = StrataConfig::default();
        config.openai.api_key = Some("sk-test".into());
        config.anthropic.api_key = Some("ak-test".into());
        Arc::new(ProfileRegistry::from_config(&config).unwrap())
    }

    fn orchestrator(backend: Arc<MockBackend>) -> Orchestrator {
        Orchestrator::new(backend, registry(), &ScoringConfig::default(), None).unwrap()
    }

    #[tokio::test]
    async fn default_use_case_applies_when_request_names_none() {
        let backend = Arc::new(MockBackend::new());
        backend.push(Outcome::success("haiku"));
        backend.push(Outcome::success("0.9")); // post-hoc quality rating
        let orch = orchestrator(backend);

        let result = orch
            .process(OrchestrationRequest::new("Write a haiku about tea"))
            .await;
        assert!(result.success);
        // Balanced is the configured default: quality first, speed fallback.
        assert_eq!(result.layers_used, vec!["Quality Layer", "Speed Layer"]);
        assert_eq!(result.quality_score, 0.9);
    }

    #[tokio::test]
    async fn scoring_disabled_reports_exact_default_score() {
        let backend = Arc::new(MockBackend::with_replies(vec!["answer".into()]));
        let orch = orchestrator(Arc::clone(&backend));
        let mut profile = registry().profile(UseCase::Balanced);
        profile.enable_quality_scoring = false;

        let result = orch
            .process_with_profile(
                OrchestrationRequest::new("Write a haiku about tea"),
                profile,
            )
            .await;
        assert!(result.success);
        assert_eq!(result.quality_score, 0.75);
        // Exactly one backend call: no scoring traffic at all.
        assert_eq!(backend.calls().len(), 1);
    }

    #[tokio::test]
    async fn gate_score_is_reused_instead_of_rescoring() {
        let backend = Arc::new(MockBackend::new());
        backend.push(Outcome::success("deep analysis"));
        backend.push(Outcome::success("0.92")); // gate rating
        let orch = orchestrator(Arc::clone(&backend));

        let result = orch
            .process(
                OrchestrationRequest::new("Analyze the trade-offs of both designs")
                    .with_use_case(UseCase::Reasoning),
            )
            .await;
        assert!(result.success);
        assert_eq!(result.quality_score, 0.92);
        // Two calls total: generation plus one gate rating, no second rating.
        assert_eq!(backend.calls().len(), 2);
    }

    #[tokio::test]
    async fn all_layer_failures_surface_the_primary_error() {
        let backend = Arc::new(MockBackend::new());
        backend.push(Outcome::failure("quality down"));
        backend.push(Outcome::failure("speed down"));
        let orch = orchestrator(Arc::clone(&backend));

        let result = orch
            .process(OrchestrationRequest::new("Write a haiku about tea"))
            .await;
        assert!(!result.success);
        assert!(result.content.is_none());
        let error = result.error.unwrap();
        assert_eq!(error.kind, ErrorKind::Provider);
        assert!(error.message.contains("quality down"));
        // The planned layers are reported and no extra recovery call runs.
        assert_eq!(result.layers_used, vec!["Quality Layer", "Speed Layer"]);
        assert_eq!(backend.calls().len(), 2);
        assert_eq!(result.optimization.accuracy_score, 0.3);
    }

    #[tokio::test]
    async fn backend_outage_yields_error_result_not_panic() {
        let backend = Arc::new(MockBackend::always_failing("everything down"));
        let orch = orchestrator(backend);

        let result = orch
            .process(OrchestrationRequest::new("Write a haiku about tea"))
            .await;
        assert!(!result.success);
        assert!(result.content.is_none());
        let error = result.error.unwrap();
        assert_eq!(error.kind, ErrorKind::Provider);
        assert!(error.message.contains("everything down"));
        assert_eq!(result.layers_used, vec!["Quality Layer", "Speed Layer"]);
    }

    #[tokio::test(start_paused = true)]
    async fn exhausted_budget_surfaces_timeout_kind() {
        let backend = Arc::new(MockBackend::new());
        backend.set_default_outcome(
            Outcome::success("too late").with_delay(Duration::from_secs(120)),
        );
        let orch = orchestrator(Arc::clone(&backend));

        let result = orch
            .process(OrchestrationRequest::new("Write a haiku about tea"))
            .await;
        assert!(!result.success);
        assert_eq!(result.error.unwrap().kind, ErrorKind::Timeout);
        assert_eq!(result.layers_used, vec!["Quality Layer", "Speed Layer"]);
        // The timeout is final: only the stalled primary call was issued.
        assert_eq!(backend.calls().len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn slow_rating_degrades_to_default_score() {
        let backend = Arc::new(MockBackend::new());
        backend.push(Outcome::success("quick answer"));
        backend.push(Outcome::success("0.9").with_delay(Duration::from_secs(60)));
        let orch = orchestrator(Arc::clone(&backend));

        let started = tokio::time::Instant::now();
        let result = orch
            .process(OrchestrationRequest::new("what is 2+2").with_use_case(UseCase::Speed))
            .await;
        assert!(result.success);
        assert_eq!(result.content.as_deref(), Some("quick answer"));
        assert_eq!(result.quality_score, 0.75);
        // The rating call is cut off at the 3s speed budget, not after the
        // backend's 60s delay.
        assert!(started.elapsed() <= Duration::from_millis(3_100));
        assert_eq!(backend.calls().len(), 2);
    }

    #[tokio::test]
    async fn bare_mode_serves_one_direct_primary_call() {
        let backend = Arc::new(MockBackend::new());
        backend.push(Outcome::success("bare answer"));
        let orch = orchestrator(Arc::clone(&backend));
        let profile = registry().profile(UseCase::Balanced);

        let result = orch
            .bare_mode(
                &OrchestrationRequest::new("Write a haiku about tea"),
                &profile,
                tokio::time::Instant::now(),
            )
            .await;
        assert!(result.success);
        assert_eq!(result.content.as_deref(), Some("bare answer"));
        assert_eq!(result.quality_score, 0.5);
        assert_eq!(result.layers_used, vec![FALLBACK_LAYER]);
        assert_eq!(result.optimization, Optimization::zeroed());
        assert_eq!(backend.calls().len(), 1);
    }

    #[tokio::test]
    async fn bare_mode_failure_yields_error_result_not_panic() {
        let backend = Arc::new(MockBackend::always_failing("everything down"));
        let orch = orchestrator(backend);
        let profile = registry().profile(UseCase::Balanced);

        let result = orch
            .bare_mode(
                &OrchestrationRequest::new("Write a haiku about tea"),
                &profile,
                tokio::time::Instant::now(),
            )
            .await;
        assert!(!result.success);
        let error = result.error.unwrap();
        assert_eq!(error.kind, ErrorKind::Provider);
        assert!(error.message.contains("everything down"));
        assert_eq!(result.layers_used, vec![FALLBACK_LAYER]);
    }

    #[tokio::test]
    async fn results_reach_the_analytics_sink() {
        let backend = Arc::new(MockBackend::new());
        backend.push(Outcome::success("haiku"));
        backend.push(Outcome::success("0.8"));
        let sink = Arc::new(RecordingSink::new());
        let orch = Orchestrator::new(
            backend,
            registry(),
            &ScoringConfig::default(),
            Some(Arc::clone(&sink) as Arc<dyn AnalyticsSink>),
        )
        .unwrap();

        let mut request = OrchestrationRequest::new("Write a haiku about tea");
        request.request_id = Some("req-42".into());
        orch.process(request).await;

        let records = sink.records();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].request_id, "req-42");
        assert!(records[0].result.success);
        assert_eq!(records[0].metadata["use_case"], "balanced");
    }

    #[tokio::test]
    async fn sink_failure_never_breaks_the_result() {
        let backend = Arc::new(MockBackend::new());
        backend.push(Outcome::success("haiku"));
        backend.push(Outcome::success("0.8"));
        let sink = Arc::new(RecordingSink::failing());
        let orch = Orchestrator::new(
            backend,
            registry(),
            &ScoringConfig::default(),
            Some(sink as Arc<dyn AnalyticsSink>),
        )
        .unwrap();

        let result = orch
            .process(OrchestrationRequest::new("Write a haiku about tea"))
            .await;
        assert!(result.success);
    }

    #[tokio::test]
    async fn generated_request_ids_are_unique() {
        let backend = Arc::new(MockBackend::new());
        backend.set_default_outcome(Outcome::success("0.8"));
        backend.push(Outcome::success("one"));
        let sink = Arc::new(RecordingSink::new());
        let orch = Orchestrator::new(
            backend.clone(),
            registry(),
            &ScoringConfig::default(),
            Some(Arc::clone(&sink) as Arc<dyn AnalyticsSink>),
        )
        .unwrap();

        orch.process(OrchestrationRequest::new("Write a haiku about tea")).await;
        orch.process(OrchestrationRequest::new("Write a haiku about rain")).await;

        let records = sink.records();
        assert_eq!(records.len(), 2);
        assert_ne!(records[0].request_id, records[1].request_id);
    }
}
