// SPDX-FileCopyrightText: 2026 Strata Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Derived efficiency metrics for a completed execution.
//!
//! Pure arithmetic over the observed usage and timing. Inputs beyond their
//! natural ranges clamp instead of failing; metrics never block a result.

use strata_core::{Optimization, TokenUsage};

/// Token count at which token efficiency reaches zero.
const TOKEN_BUDGET: f64 = 4000.0;
/// Token efficiency reported when the backend gave no usage figures.
const UNKNOWN_USAGE_EFFICIENCY: f64 = 0.5;
/// Accuracy figure for successful vs failed executions.
const ACCURACY_SUCCESS: f64 = 0.9;
const ACCURACY_FAILURE: f64 = 0.3;

/// Computes efficiency metrics for one finished execution.
pub fn compute(
    usage: Option<&TokenUsage>,
    processing_time_ms: u64,
    success: bool,
    max_latency_ms: u64,
) -> Optimization {
    let token_efficiency = match usage {
        Some(u) => (1.0 - f64::from(u.total_tokens) / TOKEN_BUDGET).max(0.0),
        None => UNKNOWN_USAGE_EFFICIENCY,
    };

    let cost_efficiency = if max_latency_ms == 0 {
        0.0
    } else {
        (1.0 - processing_time_ms as f64 / max_latency_ms as f64).max(0.0)
    };

    let accuracy_score = if success {
        ACCURACY_SUCCESS
    } else {
        ACCURACY_FAILURE
    };

    Optimization {
        token_efficiency: round2(token_efficiency.clamp(0.0, 1.0)),
        cost_efficiency: round2(cost_efficiency.clamp(0.0, 1.0)),
        accuracy_score: round2(accuracy_score),
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
