// SPDX-FileCopyrightText: 2026 Selam Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP client for the Gemini Generative Language API.
//!
//! Provides [`GeminiClient`], which lists models and calls `generateContent`.
//! It performs exactly one request per call; retry policy lives in the
//! pipeline's completion client.

use std::time::Duration;

use selam_core::SelamError;
use tracing::debug;

use crate::types::{
    ApiErrorResponse, GenerateContentRequest, GenerateContentResponse, ListModelsResponse,
};

/// Public Generative Language API host.
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";

/// Upper bound on listing pages followed in one `list_models` call.
const MAX_LIST_PAGES: usize = 5;

/// HTTP client for Gemini API communication.
#[derive(Debug, Clone)]
pub struct GeminiClient {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
}

impl GeminiClient {
    /// Creates a client with the given transport timeout.
    pub fn new(api_key: String, base_url: &str, timeout: Duration) -> Result<Self, SelamError> {
        if api_key.trim().is_empty() {
            return Err(SelamError::Config("Gemini API key is empty".into()));
        }
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| SelamError::Provider {
                message: format!("failed to build HTTP client: {e}"),
                status: None,
                source: Some(Box::new(e)),
            })?;

        Ok(Self {
            client,
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetches every page of `GET /v1beta/models`.
    pub async fn list_models(&self) -> Result<ListModelsResponse, SelamError> {
        let url = format!("{}/v1beta/models", self.base_url);
        let mut all = ListModelsResponse::default();
        let mut page_token: Option<String> = None;

        for _ in 0..MAX_LIST_PAGES {
            let mut request = self
                .client
                .get(&url)
                .query(&[("key", self.api_key.as_str()), ("pageSize", "1000")]);
            if let Some(token) = page_token.as_deref() {
                request = request.query(&[("pageToken", token)]);
            }

            let page: ListModelsResponse = self.send_json(request).await?;
            debug!(count = page.models.len(), "model listing page received");
            all.models.extend(page.models);
            page_token = page.next_page_token.filter(|t| !t.is_empty());
            if page_token.is_none() {
                break;
            }
        }
        Ok(all)
    }

    /// Calls `POST /v1beta/{model}:generateContent`.
    ///
    /// `model` may be given with or without its `models/` prefix.
    pub async fn generate_content(
        &self,
        model: &str,
        request: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse, SelamError> {
        let resource = if model.starts_with("models/") {
            model.to_string()
        } else {
            format!("models/{model}")
        };
        let url = format!("{}/v1beta/{resource}:generateContent", self.base_url);
        let builder = self
            .client
            .post(&url)
            .query(&[("key", self.api_key.as_str())])
            .json(request);
        self.send_json(builder).await
    }

    /// Sends a request and decodes a JSON success body, mapping error
    /// envelopes to [`SelamError::Provider`] with the HTTP status kept.
    async fn send_json<T: serde::de::DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<T, SelamError> {
        // Errors are stripped of their URL, which carries the API key.
        let response = request.send().await.map_err(|e| {
            let status = e.status().map(|s| s.as_u16());
            SelamError::Provider {
                message: format!("HTTP request failed: {}", e.without_url()),
                status,
                source: None,
            }
        })?;

        let status = response.status();
        let body = response.text().await.map_err(|e| SelamError::Provider {
            message: format!("failed to read response body: {}", e.without_url()),
            status: Some(status.as_u16()),
            source: None,
        })?;
        debug!(status = %status, bytes = body.len(), "Gemini response received");

        if status.is_success() {
            return serde_json::from_str(&body).map_err(|e| SelamError::Provider {
                message: format!("failed to parse Gemini response: {e}"),
                status: Some(status.as_u16()),
                source: Some(Box::new(e)),
            });
        }

        let message = match serde_json::from_str::<ApiErrorResponse>(&body) {
            Ok(api_err) => match api_err.error.status {
                Some(grpc) => format!("Gemini API error ({grpc}): {}", api_err.error.message),
                None => format!("Gemini API error: {}", api_err.error.message),
            },
            Err(_) => format!("API returned {status}: {body}"),
        };
        Err(SelamError::Provider {
            message,
            status: Some(status.as_u16()),
            source: None,
        })
    }
}
