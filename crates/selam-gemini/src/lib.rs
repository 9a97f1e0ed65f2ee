// SPDX-FileCopyrightText: 2026 Selam Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Google Gemini completion adapter for the Selam chat relay.
//!
//! Implements [`CompletionAdapter`] over the v1beta REST API: model listing
//! and single-shot `generateContent`.

pub mod client;
pub mod types;

use std::time::Duration;

use async_trait::async_trait;
use selam_config::SelamConfig;
use selam_core::error::SelamError;
use selam_core::traits::{CompletionAdapter, PluginAdapter};
use selam_core::types::{
    AdapterType, Candidate, CompletionResponse, GenerationConfig, HealthStatus, ModelInfo,
};
use tracing::info;

use crate::client::GeminiClient;
use crate::types::{Content, GenerateContentRequest, GenerateContentResponse, WireGenerationConfig};

/// Environment variable consulted when the config carries no key.
pub const API_KEY_ENV: &str = "GEMINI_API_KEY";

/// Gemini provider implementing [`CompletionAdapter`].
///
/// API key resolution order: config -> `GEMINI_API_KEY` env var -> error.
pub struct GeminiProvider {
    client: GeminiClient,
}

impl GeminiProvider {
    pub fn new(config: &SelamConfig) -> Result<Self, SelamError> {
        let api_key = resolve_api_key(config.gemini.api_key.as_deref(), std::env::var(API_KEY_ENV).ok())?;
        let client = GeminiClient::new(
            api_key,
            &config.gemini.base_url,
            Duration::from_secs(config.gemini.http_timeout_secs),
        )?;

        info!(
            base_url = client.base_url(),
            default_model = %config.gemini.default_model,
            "Gemini provider initialized"
        );
        Ok(Self { client })
    }

    pub fn with_client(client: GeminiClient) -> Self {
        Self { client }
    }
}

/// Picks the configured key if non-blank, else the environment's.
fn resolve_api_key(config_key: Option<&str>, env_key: Option<String>) -> Result<String, SelamError> {
    if let Some(key) = config_key.map(str::trim).filter(|k| !k.is_empty()) {
        return Ok(key.to_string());
    }
    env_key
        .map(|k| k.trim().to_string())
        .filter(|k| !k.is_empty())
        .ok_or_else(|| {
            SelamError::Config(format!(
                "Gemini API key not found. Set gemini.api_key in config or the {API_KEY_ENV} environment variable."
            ))
        })
}

/// Flattens the wire response into the provider-neutral shape.
fn to_completion_response(response: GenerateContentResponse) -> CompletionResponse {
    let candidates = response
        .candidates
        .into_iter()
        .map(|c| Candidate {
            parts: c
                .content
                .map(|content| content.parts.into_iter().filter_map(|p| p.text).collect())
                .unwrap_or_default(),
        })
        .collect();
    CompletionResponse {
        text: None,
        candidates,
    }
}

#[async_trait]
impl PluginAdapter for GeminiProvider {
    fn name(&self) -> &str {
        "gemini"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Completion
    }

    async fn health_check(&self) -> Result<HealthStatus, SelamError> {
        // Listing models costs no tokens.
        match self.client.list_models().await {
            Ok(_) => Ok(HealthStatus::Healthy),
            Err(e) => Ok(HealthStatus::Unhealthy(e.to_string())),
        }
    }
}

#[async_trait]
impl CompletionAdapter for GeminiProvider {
    async fn list_models(&self) -> Result<Vec<ModelInfo>, SelamError> {
        let listing = self.client.list_models().await?;
        Ok(listing
            .models
            .into_iter()
            .map(|m| ModelInfo {
                name: m.name,
                supported_generation_methods: m.supported_generation_methods,
            })
            .collect())
    }

    async fn generate(
        &self,
        model: &str,
        prompt: &str,
        config: &GenerationConfig,
    ) -> Result<CompletionResponse, SelamError> {
        let request = GenerateContentRequest {
            contents: vec![Content::user_text(prompt)],
            generation_config: WireGenerationConfig {
                max_output_tokens: config.max_output_tokens,
                temperature: config.temperature,
            },
        };
        let response = self.client.generate_content(model, &request).await?;
        Ok(to_completion_response(response))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ApiCandidate, Part};
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn provider(base_url: &str) -> GeminiProvider {
        GeminiProvider::with_client(
            GeminiClient::new("k".into(), base_url, Duration::from_secs(5)).unwrap(),
        )
    }

    #[test]
    fn config_key_wins_over_env() {
        let key = resolve_api_key(Some("from-config"), Some("from-env".into())).unwrap();
        assert_eq!(key, "from-config");
    }

    #[test]
    fn blank_config_key_falls_back_to_env() {
        let key = resolve_api_key(Some("  "), Some("from-env".into())).unwrap();
        assert_eq!(key, "from-env");
    }

    #[test]
    fn missing_key_is_config_error() {
        let err = resolve_api_key(None, None).unwrap_err();
        assert!(matches!(err, SelamError::Config(_)));
        assert!(err.to_string().contains("GEMINI_API_KEY"));
    }

    #[test]
    fn response_flattening_skips_non_text_parts() {
        let response = GenerateContentResponse {
            candidates: vec![
                ApiCandidate {
                    content: Some(Content {
                        role: Some("model".into()),
                        parts: vec![Part { text: None }, Part { text: Some("answer".into()) }],
                    }),
                    finish_reason: Some("STOP".into()),
                },
                ApiCandidate::default(),
            ],
        };
        let flat = to_completion_response(response);
        assert_eq!(flat.candidates.len(), 2);
        assert_eq!(flat.extract_text().as_deref(), Some("answer"));
        assert!(flat.candidates[1].parts.is_empty());
    }

    #[tokio::test]
    async fn generate_maps_candidates() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1beta/models/gemini-2.0-flash:generateContent"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "candidates": [{"content": {"parts": [{"text": "**Asmara**\n- capital"}]}}]
            })))
            .mount(&server)
            .await;

        let response = provider(&server.uri())
            .generate("models/gemini-2.0-flash", "q", &GenerationConfig::default())
            .await
            .unwrap();
        assert_eq!(response.extract_text().as_deref(), Some("**Asmara**\n- capital"));
    }

    #[tokio::test]
    async fn list_models_maps_generation_methods() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1beta/models"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "models": [{"name": "models/gemini-2.5-flash", "supportedGenerationMethods": ["generateContent"]}]
            })))
            .mount(&server)
            .await;

        let models = provider(&server.uri()).list_models().await.unwrap();
        assert!(models[0].supports("generateContent"));
    }

    #[tokio::test]
    async fn health_reports_unreachable_backend() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(403).set_body_json(serde_json::json!({
                "error": {"code": 403, "message": "API key not valid", "status": "PERMISSION_DENIED"}
            })))
            .mount(&server)
            .await;

        let status = provider(&server.uri()).health_check().await.unwrap();
        assert!(matches!(status, HealthStatus::Unhealthy(ref m) if m.contains("API key not valid")));
    }
}
