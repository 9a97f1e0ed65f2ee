// SPDX-FileCopyrightText: 2026 Selam Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP request handlers.
//!
//! Bodies are read as raw bytes and normalized with [`JsonPayload`], so an
//! empty or malformed body reaches validation as an empty request.

use axum::{
    Json,
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;

use selam_core::types::{ChatRequest, HealthStatus, TranslateRequest};
use selam_core::{JsonPayload, SelamError};
use selam_pipeline::{AdapterHealth, PipelineFailure, PipelineResult, TranslateResult};

use crate::server::GatewayState;

/// Response body for a successful chat.
#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub success: bool,
    /// Text shown to the user.
    pub response: String,
    /// English completion before reply translation.
    pub ai_response: String,
    pub translated_response: String,
    pub reply_lang: String,
    pub detected_input_lang: String,
    pub request_id: String,
    /// Seconds, rounded to two decimals.
    pub processing_time: f64,
}

/// Response body for POST /translate.
#[derive(Debug, Serialize)]
pub struct TranslateResponse {
    pub success: bool,
    pub translation: Option<String>,
    pub original: String,
    pub reply_lang: String,
    pub translate_url: String,
    pub message: String,
}

/// Response body for GET /health.
///
/// `status` is `"ok"` when every adapter is healthy and `"degraded"`
/// otherwise; the HTTP status is always 200.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub uptime_secs: u64,
    pub adapters: Vec<AdapterReport>,
}

#[derive(Debug, Serialize)]
pub struct AdapterReport {
    pub name: String,
    pub version: String,
    #[serde(rename = "type")]
    pub adapter_type: String,
    pub status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

/// Error response body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_id: Option<String>,
}

/// POST /chat
pub async fn post_chat(State(state): State<GatewayState>, body: Bytes) -> Response {
    let request: ChatRequest = body[..].parse_as();
    let result = state.pipeline.run_chat(request).await;
    chat_response(result)
}

/// POST /translate
pub async fn post_translate(State(state): State<GatewayState>, body: Bytes) -> Response {
    let request: TranslateRequest = body[..].parse_as();
    match state.pipeline.translate_text(request).await {
        Ok(result) => (StatusCode::OK, Json(TranslateResponse::from(result))).into_response(),
        Err(SelamError::Validation(message)) => error_response(StatusCode::BAD_REQUEST, message, None),
        Err(e) => {
            tracing::error!(error = %e, "translate request failed");
            error_response(StatusCode::INTERNAL_SERVER_ERROR, e.to_string(), None)
        }
    }
}

/// GET /health
pub async fn get_health(State(state): State<GatewayState>) -> Json<HealthResponse> {
    let adapters = state.pipeline.health().await;
    let status = if adapters.iter().all(AdapterHealth::is_healthy) {
        "ok"
    } else {
        "degraded"
    };
    Json(HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_secs: state.start_time.elapsed().as_secs(),
        adapters: adapters.into_iter().map(AdapterReport::from).collect(),
    })
}

fn chat_response(result: PipelineResult) -> Response {
    if result.success {
        let ai_response = result.raw_completion_text.unwrap_or_default();
        let body = ChatResponse {
            success: true,
            response: result.final_text.clone(),
            ai_response,
            translated_response: result.final_text,
            reply_lang: result.reply_lang.code().to_string(),
            detected_input_lang: result.detected_input_language.code().to_string(),
            request_id: result.request_id,
            processing_time: round_secs(result.elapsed_time.as_secs_f64()),
        };
        return (StatusCode::OK, Json(body)).into_response();
    }

    let status = match result.failure {
        Some(PipelineFailure::Validation) => StatusCode::BAD_REQUEST,
        Some(_) => StatusCode::SERVICE_UNAVAILABLE,
        None => StatusCode::INTERNAL_SERVER_ERROR,
    };
    let message = result
        .error_message
        .unwrap_or_else(|| "Unknown error".to_string());
    error_response(status, message, Some(result.request_id))
}

fn error_response(status: StatusCode, error: String, request_id: Option<String>) -> Response {
    (
        status,
        Json(ErrorResponse {
            success: false,
            error,
            request_id,
        }),
    )
        .into_response()
}

fn round_secs(secs: f64) -> f64 {
    (secs * 100.0).round() / 100.0
}

impl From<AdapterHealth> for AdapterReport {
    fn from(health: AdapterHealth) -> Self {
        let (status, detail) = match health.status {
            HealthStatus::Healthy => ("healthy", None),
            HealthStatus::Degraded(why) => ("degraded", Some(why)),
            HealthStatus::Unhealthy(why) => ("unhealthy", Some(why)),
        };
        Self {
            name: health.name,
            version: health.version.to_string(),
            adapter_type: health.adapter_type.to_string().to_lowercase(),
            status,
            detail,
        }
    }
}

impl From<TranslateResult> for TranslateResponse {
    fn from(result: TranslateResult) -> Self {
        Self {
            success: true,
            translation: result.translation,
            original: result.original,
            reply_lang: result.reply_lang.code().to_string(),
            translate_url: result.translate_url,
            message: result.message.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    use selam_core::types::LanguageCode;

    fn failed(failure: Option<PipelineFailure>) -> PipelineResult {
        PipelineResult {
            request_id: "42".into(),
            success: false,
            final_text: String::new(),
            raw_completion_text: None,
            detected_input_language: LanguageCode::Auto,
            reply_lang: LanguageCode::Tigrinya,
            error_message: failure.map(|f| f.user_message().to_string()),
            failure,
            elapsed_time: Duration::from_millis(10),
        }
    }

    #[test]
    fn processing_time_rounds_to_centiseconds() {
        assert_eq!(round_secs(1.23456), 1.23);
        assert_eq!(round_secs(2.996), 3.0);
    }

    #[test]
    fn failure_kinds_map_to_status_codes() {
        let cases = [
            (Some(PipelineFailure::Validation), StatusCode::BAD_REQUEST),
            (Some(PipelineFailure::RateLimited), StatusCode::SERVICE_UNAVAILABLE),
            (Some(PipelineFailure::TimedOut), StatusCode::SERVICE_UNAVAILABLE),
            (Some(PipelineFailure::Unavailable), StatusCode::SERVICE_UNAVAILABLE),
            (None, StatusCode::INTERNAL_SERVER_ERROR),
        ];
        for (failure, expected) in cases {
            assert_eq!(chat_response(failed(failure)).status(), expected, "{failure:?}");
        }
    }

    #[test]
    fn adapter_report_carries_status_detail() {
        use selam_core::types::AdapterType;

        let report = AdapterReport::from(AdapterHealth {
            name: "gemini".into(),
            version: semver::Version::new(0, 1, 0),
            adapter_type: AdapterType::Completion,
            status: HealthStatus::Unhealthy("HTTP 403".into()),
        });
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["type"], "completion");
        assert_eq!(json["version"], "0.1.0");
        assert_eq!(json["status"], "unhealthy");
        assert_eq!(json["detail"], "HTTP 403");
    }

    #[test]
    fn error_response_omits_missing_request_id() {
        let json = serde_json::to_string(&ErrorResponse {
            success: false,
            error: "No text provided".into(),
            request_id: None,
        })
        .unwrap();
        assert_eq!(json, r#"{"success":false,"error":"No text provided"}"#);
    }
}
