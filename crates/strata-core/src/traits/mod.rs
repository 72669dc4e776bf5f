// SPDX-FileCopyrightText: 2026 Strata Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Capability trait definitions for the Strata orchestration core.
//!
//! Implementations are external collaborators; the orchestrator depends
//! only on these traits, never on provider-specific types. All traits use
//! `#[async_trait]` for dynamic dispatch compatibility.

pub mod backend;
pub mod sink;

pub use backend::BackendClient;
pub use sink::{AnalyticsSink, TracingSink};
