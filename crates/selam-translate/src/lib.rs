// SPDX-FileCopyrightText: 2026 Selam Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Translation adapter backed by the public Google web translation endpoint.
//!
//! Calls `GET {base}/translate_a/single?client=gtx&dt=t` and stitches the
//! translated segments of the nested-array response back together.

use std::time::Duration;

use async_trait::async_trait;
use selam_config::SelamConfig;
use selam_core::error::SelamError;
use selam_core::traits::{PluginAdapter, TranslationAdapter};
use selam_core::types::{AdapterType, HealthStatus, LanguageCode};
use tracing::{debug, info, warn};

/// Public translation host.
pub const DEFAULT_BASE_URL: &str = "https://translate.googleapis.com";

const TRANSLATE_PATH: &str = "/translate_a/single";

const USER_AGENT: &str =
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0 Safari/537.36";

/// [`TranslationAdapter`] over the keyless `client=gtx` endpoint.
#[derive(Debug, Clone)]
pub struct GoogleTranslator {
    client: reqwest::Client,
    base_url: String,
}

impl GoogleTranslator {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, SelamError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| SelamError::Translation {
                message: format!("failed to build HTTP client: {e}"),
                source: Some(Box::new(e)),
            })?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Builds the adapter from the `[translate]` config section.
    pub fn from_config(config: &SelamConfig) -> Result<Self, SelamError> {
        let translator = Self::new(
            &config.translate.base_url,
            Duration::from_secs(config.translate.http_timeout_secs),
        )?;
        info!(base_url = %translator.base_url, "translation adapter initialized");
        Ok(translator)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn fetch(
        &self,
        text: &str,
        source: &LanguageCode,
        target: &LanguageCode,
    ) -> Result<Option<String>, SelamError> {
        let url = format!("{}{TRANSLATE_PATH}", self.base_url);
        let response = self
            .client
            .get(&url)
            .query(&[
                ("client", "gtx"),
                ("sl", source.code()),
                ("tl", target.code()),
                ("dt", "t"),
                ("q", text),
            ])
            .send()
            .await
            .map_err(|e| SelamError::Translation {
                message: format!("translation request failed: {}", e.without_url()),
                source: None,
            })?;

        let status = response.status();
        let body = response.text().await.map_err(|e| SelamError::Translation {
            message: format!("failed to read translation body: {}", e.without_url()),
            source: None,
        })?;

        if !status.is_success() {
            return Err(SelamError::Translation {
                message: format!("translation endpoint returned {status}"),
                source: None,
            });
        }

        let translated = parse_segments(&body)?;
        debug!(
            source = %source,
            target = %target,
            chars_in = text.chars().count(),
            chars_out = translated.as_deref().map_or(0, |t| t.chars().count()),
            "translation response parsed"
        );
        Ok(translated)
    }
}

/// Concatenates the `[0][*][0]` strings of a `dt=t` response.
///
/// A response whose segment list is absent or empty yields `Ok(None)`;
/// anything that is not a JSON array is an error.
pub fn parse_segments(body: &str) -> Result<Option<String>, SelamError> {
    let json: serde_json::Value = serde_json::from_str(body).map_err(|e| SelamError::Translation {
        message: format!("failed to parse translation response: {e}"),
        source: Some(Box::new(e)),
    })?;

    if !json.is_array() {
        return Err(SelamError::Translation {
            message: "unexpected translation response shape".into(),
            source: None,
        });
    }

    let Some(segments) = json.get(0).and_then(|v| v.as_array()) else {
        return Ok(None);
    };

    let joined: String = segments
        .iter()
        .filter_map(|segment| segment.get(0).and_then(|v| v.as_str()))
        .collect();

    if joined.trim().is_empty() {
        Ok(None)
    } else {
        Ok(Some(joined))
    }
}

#[async_trait]
impl PluginAdapter for GoogleTranslator {
    fn name(&self) -> &str {
        "google-translate"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Translation
    }

    async fn health_check(&self) -> Result<HealthStatus, SelamError> {
        match self
            .fetch("hello", &LanguageCode::English, &LanguageCode::Tigrinya)
            .await
        {
            Ok(Some(_)) => Ok(HealthStatus::Healthy),
            Ok(None) => Ok(HealthStatus::Degraded("empty translation".into())),
            Err(e) => Ok(HealthStatus::Unhealthy(e.to_string())),
        }
    }
}

#[async_trait]
impl TranslationAdapter for GoogleTranslator {
    async fn translate(
        &self,
        text: &str,
        source: &LanguageCode,
        target: &LanguageCode,
    ) -> Result<Option<String>, SelamError> {
        self.fetch(text, source, target).await.inspect_err(|e| {
            warn!(source = %source, target = %target, error = %e, "translation call failed");
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn translator(base_url: &str) -> GoogleTranslator {
        GoogleTranslator::new(base_url, Duration::from_secs(5)).unwrap()
    }

    #[test]
    fn segments_are_concatenated_in_order() {
        let body = r#"[[["Hello. ","ሰላም። ",null,null,10],["How are you?","ከመይ ኣለኻ?",null,null,10]],null,"ti"]"#;
        assert_eq!(
            parse_segments(body).unwrap().as_deref(),
            Some("Hello. How are you?")
        );
    }

    #[test]
    fn null_segment_list_is_empty_translation() {
        assert_eq!(parse_segments(r#"[null,null,"ti"]"#).unwrap(), None);
        assert_eq!(parse_segments("[[]]").unwrap(), None);
    }

    #[test]
    fn non_array_body_is_error() {
        assert!(parse_segments(r#"{"error":"nope"}"#).is_err());
        assert!(parse_segments("<html>").is_err());
    }

    #[tokio::test]
    async fn sends_language_pair_and_text() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/translate_a/single"))
            .and(query_param("client", "gtx"))
            .and(query_param("sl", "ti"))
            .and(query_param("tl", "en"))
            .and(query_param("dt", "t"))
            .and(query_param("q", "ሰላም"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_string(r#"[[["Hello","ሰላም",null,null,10]],null,"ti"]"#),
            )
            .expect(1)
            .mount(&server)
            .await;

        let out = translator(&server.uri())
            .translate("ሰላም", &LanguageCode::Tigrinya, &LanguageCode::English)
            .await
            .unwrap();
        assert_eq!(out.as_deref(), Some("Hello"));
    }

    #[tokio::test]
    async fn auto_source_is_sent_as_auto() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(query_param("sl", "auto"))
            .respond_with(ResponseTemplate::new(200).set_body_string(r#"[[["hi","hi"]]]"#))
            .expect(1)
            .mount(&server)
            .await;

        let out = translator(&server.uri())
            .translate("hi", &LanguageCode::Auto, &LanguageCode::English)
            .await
            .unwrap();
        assert_eq!(out.as_deref(), Some("hi"));
    }

    #[tokio::test]
    async fn server_error_is_translation_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(429).set_body_string("Too Many Requests"))
            .mount(&server)
            .await;

        let err = translator(&server.uri())
            .translate("x", &LanguageCode::English, &LanguageCode::Tigrinya)
            .await
            .unwrap_err();
        assert!(matches!(err, SelamError::Translation { .. }));
        assert!(err.to_string().contains("429"), "got: {err}");
    }

    #[tokio::test]
    async fn health_is_unhealthy_when_endpoint_fails() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let status = translator(&server.uri()).health_check().await.unwrap();
        assert!(matches!(status, HealthStatus::Unhealthy(_)));
    }

    #[test]
    fn trailing_slash_is_trimmed() {
        let t = GoogleTranslator::new("http://localhost:1/", Duration::from_secs(1)).unwrap();
        assert_eq!(t.base_url(), "http://localhost:1");
    }
}
