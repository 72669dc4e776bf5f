// SPDX-FileCopyrightText: 2026 Strata Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Backend client trait for generative-model integrations.

use async_trait::async_trait;

use crate::error::StrataError;
use crate::types::{BackendProfile, CompletionResponse};

/// Uniform call contract over external generative-model endpoints.
///
/// Any provider-specific HTTP/SDK client satisfying this contract may be
/// plugged in. Calls are single-shot; cancellation is advisory and happens
/// by dropping the in-flight future.
#[async_trait]
pub trait BackendClient: Send + Sync + 'static {
    /// Returns the human-readable name of this client.
    fn name(&self) -> &str;

    /// Issues one generation call against the given backend configuration.
    async fn complete(
        &self,
        profile: &BackendProfile,
        prompt: &str,
        system_prompt: Option<&str>,
    ) -> Result<CompletionResponse, StrataError>;
}
