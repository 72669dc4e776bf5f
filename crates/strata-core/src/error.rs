// SPDX-FileCopyrightText: 2026 Strata Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the Strata orchestration core.

use thiserror::Error;

use crate::types::ErrorKind;

/// The primary error type used across the Strata workspace.
#[derive(Debug, Error)]
pub enum StrataError {
    /// Configuration errors (invalid TOML, missing required fields, type mismatches).
    #[error("configuration error: {0}")]
    Config(String),

    /// Backend call failures (network, auth, rate limiting, model not found).
    #[error("provider error: {message}")]
    Provider {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// The latency budget elapsed before a result was ready.
    #[error("operation timed out after {duration:?}")]
    Timeout { duration: std::time::Duration },

    /// Structured content was expected but could not be decoded.
    #[error("parse error: {0}")]
    Parse(String),

    /// Quality scoring fell back to its default. Informational only;
    /// this variant never crosses the orchestration boundary.
    #[error("quality scoring degraded: {0}")]
    ScoringDegraded(String),

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}

impl StrataError {
    /// Shorthand for a provider error without an underlying source.
    pub fn provider(message: impl Into<String>) -> Self {
        StrataError::Provider {
            message: message.into(),
            source: None,
        }
    }

    /// The coarse error kind surfaced in an `OrchestrationResult`.
    pub fn kind(&self) -> ErrorKind {
        match self {
            StrataError::Provider { .. } => ErrorKind::Provider,
            StrataError::Timeout { .. } => ErrorKind::Timeout,
            StrataError::Parse(_) => ErrorKind::Parse,
            StrataError::Config(_)
            | StrataError::ScoringDegraded(_)
            | StrataError::Internal(_) => ErrorKind::Internal,
        }
    }
}
