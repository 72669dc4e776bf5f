// SPDX-FileCopyrightText: 2026 Strata Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Strategy selection: from assessment + profile to an execution plan.
//!
//! Combines the complexity assessment with the orchestration profile and the
//! enabled layer set to produce an ordered list of backends plus a
//! performance estimate. A plan always exists: when no layer is enabled the
//! selector degrades to a bare pass-through over the profile's primary
//! backend.

use strata_config::{Layer, LayerPurpose, LayerSet, OrchestrationProfile};
use strata_core::{BackendProfile, LayerPerformance, ModelPerformance};
use tracing::debug;

use crate::assessor::{ComplexityAssessment, ComplexityTier};

/// Layer name reported when the selector degrades to a bare pass-through.
pub const FALLBACK_LAYER: &str = "fallback";

/// Ordered backends for one request, primary first. Built fresh per request
/// from the profile and assessment; discarded after execution.
#[derive(Debug, Clone)]
pub struct ExecutionPlan {
    pub layer_names: Vec<String>,
    pub backends: Vec<BackendProfile>,
    pub parallel: bool,
    pub performance_estimate: ModelPerformance,
}

/// Select an execution plan for the assessed request.
///
/// Rules, in priority order:
/// 1. Simple tier: the enabled speed-purpose layer alone, sequential, no
///    fallback regardless of profile.
/// 2. Reasoning required and a reasoning layer enabled: reasoning first,
///    quality as fallback; concurrency follows the profile.
/// 3. Otherwise: quality first, speed as fallback, sequential.
///
/// A plan never references a disabled layer. When a rule's preferred layer
/// is disabled the next best enabled layer is used; when none is enabled the
/// plan degrades to the profile's primary backend alone.
pub fn select(
    profile: &OrchestrationProfile,
    assessment: &ComplexityAssessment,
    layers: &LayerSet,
) -> ExecutionPlan {
    // Rule 1: trivial requests skip fallback entirely to minimize cost.
    if assessment.tier == ComplexityTier::Simple {
        let preferred = [LayerPurpose::Speed, LayerPurpose::Quality, LayerPurpose::Reasoning];
        return match best_enabled(layers, &preferred) {
            Some(layer) => single_layer_plan(layer),
            None => bare_plan(profile),
        };
    }

    // Rule 2: reasoning-heavy requests lead with the reasoning layer.
    if assessment.requires_reasoning {
        if let Some(primary) = layers.enabled(LayerPurpose::Reasoning) {
            let secondary = fallback_layer(
                profile,
                layers,
                &[LayerPurpose::Quality, LayerPurpose::Speed],
                primary.purpose,
            );
            return layered_plan(primary, secondary, profile.parallel);
        }
    }

    // Rule 3: quality first with a cheaper fallback.
    let preferred = [LayerPurpose::Quality, LayerPurpose::Reasoning, LayerPurpose::Speed];
    match best_enabled(layers, &preferred) {
        Some(primary) => {
            let secondary = fallback_layer(
                profile,
                layers,
                &[LayerPurpose::Speed, LayerPurpose::Reasoning],
                primary.purpose,
            );
            layered_plan(primary, secondary, false)
        }
        None => bare_plan(profile),
    }
}

/// First enabled layer in preference order.
fn best_enabled<'a>(layers: &'a LayerSet, preferred: &[LayerPurpose]) -> Option<&'a Layer> {
    preferred.iter().find_map(|p| layers.enabled(*p))
}

/// Secondary layer for the plan, honoring the profile's fallback switch and
/// never duplicating the primary's purpose.
fn fallback_layer<'a>(
    profile: &OrchestrationProfile,
    layers: &'a LayerSet,
    preferred: &[LayerPurpose],
    primary_purpose: LayerPurpose,
) -> Option<&'a Layer> {
    if !profile.enable_fallback {
        return None;
    }
    preferred
        .iter()
        .filter(|p| **p != primary_purpose)
        .find_map(|p| layers.enabled(*p))
}

fn single_layer_plan(layer: &Layer) -> ExecutionPlan {
    ExecutionPlan {
        layer_names: vec![layer.name.to_string()],
        backends: vec![layer.backend.clone()],
        parallel: false,
        performance_estimate: ModelPerformance {
            primary: estimate(layer.purpose),
            secondary: None,
        },
    }
}

fn layered_plan(primary: &Layer, secondary: Option<&Layer>, parallel: bool) -> ExecutionPlan {
    let mut layer_names = vec![primary.name.to_string()];
    let mut backends = vec![primary.backend.clone()];
    if let Some(layer) = secondary {
        layer_names.push(layer.name.to_string());
        backends.push(layer.backend.clone());
    }
    ExecutionPlan {
        layer_names,
        backends,
        parallel,
        performance_estimate: ModelPerformance {
            primary: estimate(primary.purpose),
            secondary: secondary.map(|l| estimate(l.purpose)),
        },
    }
}

/// Guaranteed pass-through plan over the profile's primary backend.
fn bare_plan(profile: &OrchestrationProfile) -> ExecutionPlan {
    debug!(
        use_case = %profile.use_case,
        "no enabled layer available, using bare pass-through plan"
    );
    ExecutionPlan {
        layer_names: vec![FALLBACK_LAYER.to_string()],
        backends: vec![profile.primary.clone()],
        parallel: false,
        performance_estimate: ModelPerformance {
            primary: LayerPerformance {
                latency_ms: 800,
                quality: 0.7,
            },
            secondary: None,
        },
    }
}

/// Static latency/quality expectations per layer purpose.
fn estimate(purpose: LayerPurpose) -> LayerPerformance {
    match purpose {
        LayerPurpose::Speed => LayerPerformance {
            latency_ms: 500,
            quality: 0.7,
        },
        LayerPurpose::Quality => LayerPerformance {
            latency_ms: 1200,
            quality: 0.85,
        },
        LayerPurpose::Reasoning => LayerPerformance {
            latency_ms: 2000,
            quality: 0.95,
        },
    }
}
