// SPDX-FileCopyrightText: 2026 Strata Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP client for the Anthropic Messages API.
//!
//! Handles request construction, `x-api-key` authentication, and transient
//! error retry.

use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue};
use serde::{Deserialize, Serialize};
use strata_core::{BackendProfile, CompletionResponse, StrataError, TokenUsage};
use tracing::{debug, warn};

use crate::retry::is_transient_error;

/// HTTP client for Anthropic API communication.
#[derive(Debug, Clone)]
pub struct AnthropicClient {
    client: reqwest::Client,
    base_url: String,
    max_retries: u32,
}

#[derive(Debug, Serialize)]
struct MessageRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    temperature: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    system: Option<&'a str>,
    messages: Vec<Message<'a>>,
}

#[derive(Debug, Serialize)]
struct Message<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct MessageResponse {
    content: Vec<ContentBlock>,
    model: String,
    usage: Option<MessageUsage>,
}

#[derive(Debug, Deserialize)]
struct ContentBlock {
    #[serde(rename = "type")]
    type_: String,
    #[serde(default)]
    text: String,
}

#[derive(Debug, Deserialize)]
struct MessageUsage {
    input_tokens: u32,
    output_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct ApiErrorResponse {
    error: ApiErrorBody,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    #[serde(rename = "type")]
    type_: String,
    message: String,
}

impl AnthropicClient {
    /// Creates a new Anthropic API client.
    pub fn new(
        api_key: &str,
        api_version: &str,
        base_url: impl Into<String>,
    ) -> Result<Self, StrataError> {
        let mut headers = HeaderMap::new();
        let mut key = HeaderValue::from_str(api_key).map_err(|e| {
            StrataError::Config(format!("invalid API key header value: {e}"))
        })?;
        key.set_sensitive(true);
        headers.insert("x-api-key", key);
        headers.insert(
            "anthropic-version",
            HeaderValue::from_str(api_version).map_err(|e| {
                StrataError::Config(format!("invalid API version header value: {e}"))
            })?,
        );
        headers.insert("content-type", HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(300))
            .build()
            .map_err(|e| StrataError::Provider {
                message: format!("failed to build HTTP client: {e}"),
                source: Some(Box::new(e)),
            })?;

        Ok(Self {
            client,
            base_url: base_url.into(),
            max_retries: 1,
        })
    }

    /// Issues one message call.
    ///
    /// On transient errors (429, 500, 503, 529), retries once after a
    /// 1-second delay.
    pub async fn complete(
        &self,
        profile: &BackendProfile,
        prompt: &str,
        system_prompt: Option<&str>,
    ) -> Result<CompletionResponse, StrataError> {
        let request = MessageRequest {
            model: &profile.model,
            max_tokens: profile.max_tokens,
            temperature: profile.temperature,
            system: system_prompt,
            messages: vec![Message {
                role: "user",
                content: prompt,
            }],
        };
        let url = format!("{}/messages", self.base_url);

        let mut last_error = None;

        for attempt in 0..=self.max_retries {
            if attempt > 0 {
                warn!(attempt, "retrying Anthropic request after transient error");
                tokio::time::sleep(Duration::from_secs(1)).await;
            }

            let response = self
                .client
                .post(&url)
                .json(&request)
                .send()
                .await
                .map_err(|e| StrataError::Provider {
                    message: format!("HTTP request failed: {e}"),
                    source: Some(Box::new(e)),
                })?;

            let status = response.status();
            debug!(status = %status, attempt, model = %profile.model, "message response received");

            if status.is_success() {
                let body = response.text().await.map_err(|e| StrataError::Provider {
                    message: format!("failed to read response body: {e}"),
                    source: Some(Box::new(e)),
                })?;
                let message: MessageResponse = serde_json::from_str(&body).map_err(|e| {
                    StrataError::Parse(format!("malformed Anthropic response: {e}"))
                })?;
                return into_completion(message);
            }

            if is_transient_error(status) && attempt < self.max_retries {
                let body = response.text().await.unwrap_or_default();
                warn!(status = %status, body = %body, "transient error, will retry");
                last_error = Some(StrataError::Provider {
                    message: format!("API returned {status}: {body}"),
                    source: None,
                });
                continue;
            }

            // Non-transient error or exhausted retries.
            let body = response.text().await.unwrap_or_default();
            let message = if let Ok(api_err) = serde_json::from_str::<ApiErrorResponse>(&body) {
                format!(
                    "Anthropic API error ({}): {}",
                    api_err.error.type_, api_err.error.message
                )
            } else {
                format!("API returned {status}: {body}")
            };
            return Err(StrataError::Provider {
                message,
                source: None,
            });
        }

        Err(last_error.unwrap_or_else(|| StrataError::Provider {
            message: "message request failed after retries".into(),
            source: None,
        }))
    }
}

fn into_completion(message: MessageResponse) -> Result<CompletionResponse, StrataError> {
    let content = message
        .content
        .iter()
        .filter(|block| block.type_ == "text")
        .map(|block| block.text.as_str())
        .collect::<String>();
    if content.is_empty() {
        return Err(StrataError::Parse(
            "Anthropic response contained no text blocks".into(),
        ));
    }
    Ok(CompletionResponse {
        content,
        model: message.model,
        usage: message.usage.map(|u| TokenUsage {
            prompt_tokens: u.input_tokens,
            completion_tokens: u.output_tokens,
            total_tokens: u.input_tokens + u.output_tokens,
        }),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use strata_core::ProviderId;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn profile() -> BackendProfile {
        BackendProfile {
            provider: ProviderId::Anthropic,
            model: "claude-3-5-sonnet-20241022".into(),
            temperature: 0.6,
            max_tokens: 2000,
        }
    }

    fn success_body() -> serde_json::Value {
        serde_json::json!({
            "id": "msg_1",
            "type": "message",
            "role": "assistant",
            "model": "claude-3-5-sonnet-20241022",
            "content": [{ "type": "text", "text": "hello from anthropic" }],
            "stop_reason": "end_turn",
            "usage": { "input_tokens": 15, "output_tokens": 9 }
        })
    }

    #[tokio::test]
    async fn sends_api_key_and_version_headers() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/messages"))
            .and(header("x-api-key", "test-key"))
            .and(header("anthropic-version", "2023-06-01"))
            .respond_with(ResponseTemplate::new(200).set_body_json(success_body()))
            .expect(1)
            .mount(&server)
            .await;

        let client = AnthropicClient::new("test-key", "2023-06-01", server.uri()).unwrap();
        let resp = client.complete(&profile(), "say hello", None).await.unwrap();
        assert_eq!(resp.content, "hello from anthropic");
        assert_eq!(resp.usage.unwrap().total_tokens, 24);
    }

    #[tokio::test]
    async fn system_prompt_is_a_top_level_field() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/messages"))
            .and(body_partial_json(serde_json::json!({
                "system": "be terse",
                "messages": [{ "role": "user", "content": "say hello" }]
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(success_body()))
            .expect(1)
            .mount(&server)
            .await;

        let client = AnthropicClient::new("test-key", "2023-06-01", server.uri()).unwrap();
        client
            .complete(&profile(), "say hello", Some("be terse"))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn retries_once_on_overloaded() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/messages"))
            .respond_with(ResponseTemplate::new(529).set_body_string("overloaded"))
            .up_to_n_times(1)
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/messages"))
            .respond_with(ResponseTemplate::new(200).set_body_json(success_body()))
            .expect(1)
            .mount(&server)
            .await;

        let client = AnthropicClient::new("test-key", "2023-06-01", server.uri()).unwrap();
        let resp = client.complete(&profile(), "say hello", None).await.unwrap();
        assert_eq!(resp.content, "hello from anthropic");
    }

    #[tokio::test]
    async fn api_error_body_is_surfaced() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/messages"))
            .respond_with(ResponseTemplate::new(400).set_body_json(serde_json::json!({
                "type": "error",
                "error": { "type": "invalid_request_error", "message": "max_tokens required" }
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = AnthropicClient::new("test-key", "2023-06-01", server.uri()).unwrap();
        let err = client.complete(&profile(), "say hello", None).await.unwrap_err();
        assert!(err.to_string().contains("max_tokens required"));
    }

    #[tokio::test]
    async fn text_blocks_are_concatenated() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/messages"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "model": "claude-3-5-sonnet-20241022",
                "content": [
                    { "type": "text", "text": "part one " },
                    { "type": "text", "text": "part two" }
                ],
                "usage": { "input_tokens": 1, "output_tokens": 2 }
            })))
            .mount(&server)
            .await;

        let client = AnthropicClient::new("test-key", "2023-06-01", server.uri()).unwrap();
        let resp = client.complete(&profile(), "say hello", None).await.unwrap();
        assert_eq!(resp.content, "part one part two");
    }
}
