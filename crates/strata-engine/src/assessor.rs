// SPDX-FileCopyrightText: 2026 Strata Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Heuristic request complexity assessment.
//!
//! Classifies an incoming prompt into Simple/Moderate/Complex tiers using
//! zero-cost heuristic rules. No backend pre-call, no network, no latency;
//! identical text always produces identical assessments.

use strum::Display;

/// Request complexity tiers driving strategy selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "lowercase")]
pub enum ComplexityTier {
    /// Trivial requests served by the speed tier alone.
    Simple,
    /// General generation, creative tasks, moderate length.
    Moderate,
    /// Long or analysis-heavy requests warranting the strongest backends.
    Complex,
}

/// Content-type hint derived alongside the tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "lowercase")]
pub enum ContentType {
    Creative,
    Analytical,
    Simple,
}

/// Result of assessing a request's complexity. Derived per request and
/// discarded with it.
#[derive(Debug, Clone, PartialEq)]
pub struct ComplexityAssessment {
    pub tier: ComplexityTier,
    pub requires_reasoning: bool,
    /// Rough token estimate: word count x 1.3, rounded up.
    pub estimated_tokens: u32,
    pub content_type: ContentType,
}

/// Vocabulary signalling analysis/comparison work (contains, case-insensitive).
const ANALYTIC_TERMS: &[&str] = &[
    "analyze", "compare", "evaluate", "strategy", "complex", "detailed", "comprehensive",
];

/// Vocabulary signalling creative generation work (contains, case-insensitive).
const CREATIVE_TERMS: &[&str] = &[
    "create", "generate", "write", "design", "craft", "compose",
];

/// Word count above which a request is Complex regardless of vocabulary.
const COMPLEX_WORD_THRESHOLD: usize = 200;
/// Word count above which a request is at least Moderate.
const MODERATE_WORD_THRESHOLD: usize = 50;

/// Assess a prompt's complexity using heuristic signals.
///
/// Pure function of the prompt text; empty input defaults to Simple.
pub fn assess(prompt: &str) -> ComplexityAssessment {
    let trimmed = prompt.trim();
    if trimmed.is_empty() {
        return ComplexityAssessment {
            tier: ComplexityTier::Simple,
            requires_reasoning: false,
            estimated_tokens: 0,
            content_type: ContentType::Simple,
        };
    }

    let lower = trimmed.to_lowercase();
    let word_count = trimmed.split_whitespace().count();
    let analytic = ANALYTIC_TERMS.iter().any(|t| lower.contains(t));
    let creative = CREATIVE_TERMS.iter().any(|t| lower.contains(t));

    let tier = if word_count > COMPLEX_WORD_THRESHOLD || analytic {
        ComplexityTier::Complex
    } else if word_count > MODERATE_WORD_THRESHOLD || creative {
        ComplexityTier::Moderate
    } else {
        ComplexityTier::Simple
    };

    let content_type = if creative {
        ContentType::Creative
    } else if analytic {
        ContentType::Analytical
    } else {
        ContentType::Simple
    };

    ComplexityAssessment {
        tier,
        requires_reasoning: analytic,
        estimated_tokens: (word_count as f64 * 1.3).ceil() as u32,
        content_type,
    }
}
