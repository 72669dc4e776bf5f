// SPDX-FileCopyrightText: 2026 Strata Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP backend clients for the Strata workspace.
//!
//! Implements the `BackendClient` contract over the OpenAI Chat Completions
//! API and the Anthropic Messages API, with [`ProviderRouter`] dispatching
//! per-call by provider id.

pub mod anthropic;
pub mod openai;
mod retry;
pub mod router;

pub use anthropic::AnthropicClient;
pub use openai::OpenAiClient;
pub use router::ProviderRouter;
