// SPDX-FileCopyrightText: 2026 Strata Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Feedback-based quality scoring via one cheap backend call.
//!
//! The scorer asks a low-cost model to rate produced content against the
//! original request with a single decimal between 0.0 and 1.0. It is purely
//! advisory: any failure to obtain or parse a rating degrades to the
//! configured default score and never blocks the pipeline.

use std::sync::Arc;

use strata_config::ScoringConfig;
use strata_core::{BackendClient, BackendProfile, StrataError};
use tracing::{debug, warn};

/// System prompt pinning the scoring call to a bare numeric reply.
const SCORING_SYSTEM_PROMPT: &str =
    "You are a content quality assessor. Respond only with a decimal number.";

/// Rates generated content against the original prompt.
#[derive(Clone)]
pub struct QualityScorer {
    backend: Arc<dyn BackendClient>,
    profile: BackendProfile,
    default_score: f64,
    max_content_chars: usize,
}

impl QualityScorer {
    /// Creates a scorer over the given backend client and scoring config.
    pub fn new(
        backend: Arc<dyn BackendClient>,
        config: &ScoringConfig,
    ) -> Result<Self, StrataError> {
        Ok(Self {
            backend,
            profile: config.backend_profile()?,
            default_score: config.default_score,
            max_content_chars: config.max_content_chars,
        })
    }

    /// The score reported when scoring is disabled or degraded.
    pub fn default_score(&self) -> f64 {
        self.default_score
    }

    /// Rates `content` against `original_prompt`, returning a value in `[0, 1]`.
    ///
    /// Never fails: empty content, backend errors, and unparseable replies
    /// all degrade to the default score.
    pub async fn score(&self, content: &str, original_prompt: &str) -> f64 {
        if content.is_empty() {
            return self.default_score;
        }
        match self.try_score(content, original_prompt).await {
            Ok(score) => {
                debug!(score, "quality score obtained");
                score
            }
            Err(e) => {
                warn!(error = %e, "quality scoring degraded, using default score");
                self.default_score
            }
        }
    }

    async fn try_score(&self, content: &str, original_prompt: &str) -> Result<f64, StrataError> {
        let excerpt: String = content.chars().take(self.max_content_chars).collect();
        let rating_prompt = format!(
            "Rate the quality of this AI-generated content on a scale of 0.0 to 1.0.\n\n\
             Original prompt: \"{original_prompt}\"\n\n\
             Generated content: \"{excerpt}\"\n\n\
             Consider: relevance, accuracy, clarity, completeness, creativity.\n\
             Respond with only a number between 0.0 and 1.0."
        );

        let response = self
            .backend
            .complete(&self.profile, &rating_prompt, Some(SCORING_SYSTEM_PROMPT))
            .await?;

        let raw = response.content.trim();
        let value: f64 = raw
            .split_whitespace()
            .next()
            .unwrap_or("")
            .parse()
            .map_err(|_| {
                StrataError::ScoringDegraded(format!(
                    "backend returned non-numeric rating `{raw}`"
                ))
            })?;

        Ok(value.clamp(0.0, 1.0))
    }
}
