// SPDX-FileCopyrightText: 2026 Strata Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Provider routing behind the uniform backend contract.
//!
//! [`ProviderRouter`] owns one client per configured provider and dispatches
//! each call by the backend profile's provider id. Providers without
//! credentials simply have no client; calls routed to them fail with a
//! provider error rather than a panic.

use async_trait::async_trait;
use strata_config::StrataConfig;
use strata_core::{BackendClient, BackendProfile, CompletionResponse, ProviderId, StrataError};
use tracing::info;

use crate::anthropic::AnthropicClient;
use crate::openai::OpenAiClient;

/// Dispatches backend calls to the provider named in the profile.
pub struct ProviderRouter {
    openai: Option<OpenAiClient>,
    anthropic: Option<AnthropicClient>,
}

impl ProviderRouter {
    /// Builds a router from loaded configuration, constructing one client
    /// per provider with credentials present.
    pub fn from_config(config: &StrataConfig) -> Result<Self, StrataError> {
        let openai = config
            .openai
            .api_key
            .as_deref()
            .map(|key| OpenAiClient::new(key, config.openai.base_url.clone()))
            .transpose()?;
        let anthropic = config
            .anthropic
            .api_key
            .as_deref()
            .map(|key| {
                AnthropicClient::new(
                    key,
                    &config.anthropic.api_version,
                    config.anthropic.base_url.clone(),
                )
            })
            .transpose()?;

        info!(
            openai = openai.is_some(),
            anthropic = anthropic.is_some(),
            "provider router initialized"
        );
        Ok(Self { openai, anthropic })
    }
}

#[async_trait]
impl BackendClient for ProviderRouter {
    fn name(&self) -> &str {
        "provider-router"
    }

    async fn complete(
        &self,
        profile: &BackendProfile,
        prompt: &str,
        system_prompt: Option<&str>,
    ) -> Result<CompletionResponse, StrataError> {
        match profile.provider {
            ProviderId::OpenAi => match &self.openai {
                Some(client) => client.complete(profile, prompt, system_prompt).await,
                None => Err(StrataError::provider("no OpenAI credentials configured")),
            },
            ProviderId::Anthropic => match &self.anthropic {
                Some(client) => client.complete(profile, prompt, system_prompt).await,
                None => Err(StrataError::provider("no Anthropic credentials configured")),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn profile(provider: ProviderId, model: &str) -> BackendProfile {
        BackendProfile {
            provider,
            model: model.into(),
            temperature: 0.5,
            max_tokens: 100,
        }
    }

    #[tokio::test]
    async fn routes_openai_calls_to_the_openai_client() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "model": "gpt-4o-mini",
                "choices": [{ "message": { "role": "assistant", "content": "routed" } }],
                "usage": { "prompt_tokens": 1, "completion_tokens": 1, "total_tokens": 2 }
            })))
            .expect(1)
            .mount(&server)
            .await;

        let mut config = StrataConfig::default();
        config.openai.api_key = Some("sk-test".into());
        config.openai.base_url = server.uri();
        let router = ProviderRouter::from_config(&config).unwrap();

        let resp = router
            .complete(&profile(ProviderId::OpenAi, "gpt-4o-mini"), "hi", None)
            .await
            .unwrap();
        assert_eq!(resp.content, "routed");
    }

    #[tokio::test]
    async fn routes_anthropic_calls_to_the_anthropic_client() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/messages"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "model": "claude-3-5-sonnet-20241022",
                "content": [{ "type": "text", "text": "routed" }],
                "usage": { "input_tokens": 1, "output_tokens": 1 }
            })))
            .expect(1)
            .mount(&server)
            .await;

        let mut config = StrataConfig::default();
        config.anthropic.api_key = Some("ak-test".into());
        config.anthropic.base_url = server.uri();
        let router = ProviderRouter::from_config(&config).unwrap();

        let resp = router
            .complete(
                &profile(ProviderId::Anthropic, "claude-3-5-sonnet-20241022"),
                "hi",
                None,
            )
            .await
            .unwrap();
        assert_eq!(resp.content, "routed");
    }

    #[tokio::test]
    async fn unconfigured_provider_fails_cleanly() {
        let mut config = StrataConfig::default();
        config.openai.api_key = Some("sk-test".into());
        let router = ProviderRouter::from_config(&config).unwrap();

        let err = router
            .complete(
                &profile(ProviderId::Anthropic, "claude-3-5-sonnet-20241022"),
                "hi",
                None,
            )
            .await
            .unwrap_err();
        assert!(err.to_string().contains("no Anthropic credentials"));
    }

    #[test]
    fn router_builds_with_no_credentials_at_all() {
        let router = ProviderRouter::from_config(&StrataConfig::default()).unwrap();
        assert!(router.openai.is_none());
        assert!(router.anthropic.is_none());
    }
}
