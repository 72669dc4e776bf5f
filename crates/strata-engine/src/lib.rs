// SPDX-FileCopyrightText: 2026 Strata Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Adaptive inference orchestration for the Strata workspace.
//!
//! The pipeline for each request:
//!
//! 1. [`assessor`] classifies the prompt's complexity with zero-cost
//!    heuristics.
//! 2. [`selector`] combines assessment and profile into an execution plan.
//! 3. [`executor`] runs the plan (sequential fallback or parallel race)
//!    within the latency budget, gating candidates on quality when the
//!    profile demands it.
//! 4. [`scorer`] rates the accepted content; [`optimizer`] derives
//!    efficiency metrics.
//! 5. [`orchestrator`] wraps it all behind a no-throw boundary with a
//!    bare-mode last resort.
//!
//! [`service`] adds prompt shaping and use-case shortcuts on top.

pub mod assessor;
pub mod executor;
pub mod optimizer;
pub mod orchestrator;
pub mod scorer;
pub mod selector;
pub mod service;

pub use assessor::{ComplexityAssessment, ComplexityTier, ContentType, assess};
pub use executor::{ExecutionEngine, RawResult};
pub use orchestrator::{OrchestrationRequest, Orchestrator};
pub use scorer::QualityScorer;
pub use selector::{ExecutionPlan, FALLBACK_LAYER, select};
pub use service::{InferenceService, ServiceRequest, optimize_prompt};
