// SPDX-FileCopyrightText: 2026 Strata Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test utilities for Strata integration tests.
//!
//! Provides mock implementations of the core traits for fast, deterministic,
//! CI-runnable tests without external services.
//!
//! # Components
//!
//! - [`MockBackend`] - Mock backend client with scripted outcomes
//! - [`RecordingSink`] - In-memory analytics sink capturing records

pub mod mock_backend;
pub mod recording_sink;

pub use mock_backend::{MockBackend, Outcome, RecordedCall};
pub use recording_sink::{RecordingSink, SinkRecord};
