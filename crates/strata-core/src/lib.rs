// SPDX-FileCopyrightText: 2026 Strata Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the Strata inference-orchestration workspace.
//!
//! This crate provides the foundational trait definitions, error types, and
//! common types used throughout the Strata workspace. Backend integrations
//! and analytics sinks implement traits defined here.

pub mod error;
pub mod traits;
pub mod types;

// Re-export key items at crate root for ergonomic imports.
pub use error::StrataError;
pub use traits::{AnalyticsSink, BackendClient, TracingSink};
pub use types::{
    BackendProfile, CompletionResponse, ErrorKind, LayerPerformance, ModelPerformance,
    Optimization, OrchestrationResult, ProviderId, ResultError, TokenUsage,
};
