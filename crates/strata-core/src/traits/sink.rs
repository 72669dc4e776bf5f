// SPDX-FileCopyrightText: 2026 Strata Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Analytics sink trait for recording orchestration outcomes.

use async_trait::async_trait;

use crate::error::StrataError;
use crate::types::OrchestrationResult;

/// Receives one record per assembled orchestration result.
///
/// Sink failures must not affect the result returned to the caller; the
/// orchestrator logs and discards them.
#[async_trait]
pub trait AnalyticsSink: Send + Sync + 'static {
    /// Records a completed orchestration result with caller-supplied metadata.
    async fn record(
        &self,
        request_id: &str,
        result: &OrchestrationResult,
        metadata: &serde_json::Value,
    ) -> Result<(), StrataError>;
}

/// Default sink that emits result metadata as structured tracing fields.
#[derive(Debug, Default)]
pub struct TracingSink;

#[async_trait]
impl AnalyticsSink for TracingSink {
    async fn record(
        &self,
        request_id: &str,
        result: &OrchestrationResult,
        metadata: &serde_json::Value,
    ) -> Result<(), StrataError> {
        tracing::info!(
            request_id,
            success = result.success,
            quality_score = result.quality_score,
            processing_time_ms = result.processing_time_ms,
            layers = ?result.layers_used,
            metadata = %metadata,
            "orchestration result recorded"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{LayerPerformance, ModelPerformance, Optimization};

    fn sample_result() -> OrchestrationResult {
        OrchestrationResult {
            success: true,
            content: Some("ok".into()),
            error: None,
            usage: None,
            quality_score: 0.75,
            layers_used: vec!["Speed Layer".into()],
            processing_time_ms: 12,
            model_performance: ModelPerformance {
                primary: LayerPerformance {
                    latency_ms: 500,
                    quality: 0.7,
                },
                secondary: None,
            },
            optimization: Optimization::zeroed(),
        }
    }

    #[tokio::test]
    async fn tracing_sink_never_fails() {
        let sink = TracingSink;
        let meta = serde_json::json!({ "use_case": "speed" });
        assert!(sink.record("req-1", &sample_result(), &meta).await.is_ok());
    }
}
