// SPDX-FileCopyrightText: 2026 Strata Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mock backend client for deterministic testing.
//!
//! `MockBackend` implements `BackendClient` with scripted outcomes, enabling
//! fast, CI-runnable tests without external API calls. Outcomes are resolved
//! in order of specificity: the global FIFO queue first, then the per-model
//! script for the requested model, then the configured default outcome.

use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;

use strata_core::{
    BackendClient, BackendProfile, CompletionResponse, StrataError, TokenUsage,
};

/// One scripted call outcome.
#[derive(Debug, Clone)]
pub struct Outcome {
    reply: Result<String, String>,
    delay: Option<Duration>,
}

impl Outcome {
    /// A successful completion with the given content.
    pub fn success(content: impl Into<String>) -> Self {
        Self {
            reply: Ok(content.into()),
            delay: None,
        }
    }

    /// A provider error with the given message.
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            reply: Err(message.into()),
            delay: None,
        }
    }

    /// Delays resolution by the given duration (respects paused test time).
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }
}

/// A call observed by the mock, for assertions.
#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub model: String,
    pub prompt: String,
    pub system_prompt: Option<String>,
}

/// A mock backend client that returns scripted outcomes.
///
/// When no script matches, a default "mock response" is returned with
/// fixed token usage.
pub struct MockBackend {
    queue: Mutex<VecDeque<Outcome>>,
    scripts: Mutex<HashMap<String, VecDeque<Outcome>>>,
    default_outcome: Mutex<Option<Outcome>>,
    calls: Mutex<Vec<RecordedCall>>,
}

impl MockBackend {
    /// Create a mock backend with no scripted outcomes.
    pub fn new() -> Self {
        Self {
            queue: Mutex::new(VecDeque::new()),
            scripts: Mutex::new(HashMap::new()),
            default_outcome: Mutex::new(None),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Create a mock backend pre-loaded with successful replies.
    pub fn with_replies(replies: Vec<String>) -> Self {
        let backend = Self::new();
        for reply in replies {
            backend.push(Outcome::success(reply));
        }
        backend
    }

    /// Create a mock backend where every call fails with the given message.
    pub fn always_failing(message: impl Into<String>) -> Self {
        let backend = Self::new();
        backend.set_default_outcome(Outcome::failure(message));
        backend
    }

    /// Queue an outcome consumed by the next call, regardless of model.
    pub fn push(&self, outcome: Outcome) {
        self.queue.lock().unwrap().push_back(outcome);
    }

    /// Queue an outcome consumed by the next call for a specific model.
    /// Model scripts are checked after the global queue.
    pub fn script(&self, model: impl Into<String>, outcome: Outcome) {
        self.scripts
            .lock()
            .unwrap()
            .entry(model.into())
            .or_default()
            .push_back(outcome);
    }

    /// Outcome returned when neither the queue nor a model script matches.
    pub fn set_default_outcome(&self, outcome: Outcome) {
        *self.default_outcome.lock().unwrap() = Some(outcome);
    }

    /// All calls observed so far, in order.
    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }

    fn next_outcome(&self, model: &str) -> Outcome {
        if let Some(outcome) = self.queue.lock().unwrap().pop_front() {
            return outcome;
        }
        if let Some(outcome) = self
            .scripts
            .lock()
            .unwrap()
            .get_mut(model)
            .and_then(VecDeque::pop_front)
        {
            return outcome;
        }
        self.default_outcome
            .lock()
            .unwrap()
            .clone()
            .unwrap_or_else(|| Outcome::success("mock response"))
    }
}

impl Default for MockBackend {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BackendClient for MockBackend {
    fn name(&self) -> &str {
        "mock-backend"
    }

    async fn complete(
        &self,
        profile: &BackendProfile,
        prompt: &str,
        system_prompt: Option<&str>,
    ) -> Result<CompletionResponse, StrataError> {
        self.calls.lock().unwrap().push(RecordedCall {
            model: profile.model.clone(),
            prompt: prompt.to_string(),
            system_prompt: system_prompt.map(str::to_string),
        });

        let outcome = self.next_outcome(&profile.model);
        if let Some(delay) = outcome.delay {
            tokio::time::sleep(delay).await;
        }
        match outcome.reply {
            Ok(content) => Ok(CompletionResponse {
                content,
                model: profile.model.clone(),
                usage: Some(TokenUsage {
                    prompt_tokens: 10,
                    completion_tokens: 20,
                    total_tokens: 30,
                }),
            }),
            Err(message) => Err(StrataError::provider(message)),
        }
    }
}
