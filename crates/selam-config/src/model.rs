// SPDX-FileCopyrightText: 2026 Selam Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs for the Selam chat relay.
//!
//! All structs use `#[serde(deny_unknown_fields)]` to reject unrecognized
//! config keys at startup, providing actionable error messages.

use std::time::Duration;

use selam_core::LanguageCode;
use serde::{Deserialize, Serialize};

/// Top-level Selam configuration.
///
/// Loaded from TOML files following XDG hierarchy, with environment variable overrides.
/// All sections are optional and default to the reference timing policy.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct SelamConfig {
    /// HTTP listener and logging settings.
    #[serde(default)]
    pub server: ServerConfig,

    /// Gemini completion backend settings.
    #[serde(default)]
    pub gemini: GeminiConfig,

    /// Translation provider settings.
    #[serde(default)]
    pub translate: TranslateConfig,

    /// Request time budget and retry policy.
    #[serde(default)]
    pub pipeline: PipelineConfig,
}

/// HTTP listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ServerConfig {
    /// Host address to bind.
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to bind.
    #[serde(default = "default_port")]
    pub port: u16,

    /// Logging level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            log_level: default_log_level(),
        }
    }
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    5001
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Gemini API configuration.
#[derive(Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct GeminiConfig {
    /// Gemini API key. `None` falls back to the `GEMINI_API_KEY` environment variable.
    #[serde(default)]
    pub api_key: Option<String>,

    /// Base URL of the Generative Language API.
    #[serde(default = "default_gemini_base_url")]
    pub base_url: String,

    /// Model used when listing fails or lists nothing usable.
    #[serde(default = "default_gemini_model")]
    pub default_model: String,

    /// Models tried in order when the listing succeeds (fastest/newest first).
    #[serde(default = "default_preferred_models")]
    pub preferred_models: Vec<String>,

    /// Maximum tokens to generate per reply.
    #[serde(default = "default_max_output_tokens")]
    pub max_output_tokens: u32,

    /// Sampling temperature.
    #[serde(default = "default_temperature")]
    pub temperature: f32,

    /// Transport-level timeout for a single HTTP call.
    #[serde(default = "default_gemini_http_timeout_secs")]
    pub http_timeout_secs: u64,
}

impl std::fmt::Debug for GeminiConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "[redacted]"))
            .field("base_url", &self.base_url)
            .field("default_model", &self.default_model)
            .field("preferred_models", &self.preferred_models)
            .field("max_output_tokens", &self.max_output_tokens)
            .field("temperature", &self.temperature)
            .field("http_timeout_secs", &self.http_timeout_secs)
            .finish()
    }
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_gemini_base_url(),
            default_model: default_gemini_model(),
            preferred_models: default_preferred_models(),
            max_output_tokens: default_max_output_tokens(),
            temperature: default_temperature(),
            http_timeout_secs: default_gemini_http_timeout_secs(),
        }
    }
}

fn default_gemini_base_url() -> String {
    "https://generativelanguage.googleapis.com".to_string()
}

fn default_gemini_model() -> String {
    "models/gemini-2.0-flash".to_string()
}

fn default_preferred_models() -> Vec<String> {
    vec![
        "models/gemini-2.0-flash".to_string(),
        "models/gemini-flash-latest".to_string(),
        "models/gemini-2.5-flash".to_string(),
    ]
}

fn default_max_output_tokens() -> u32 {
    1024
}

fn default_temperature() -> f32 {
    0.7
}

fn default_gemini_http_timeout_secs() -> u64 {
    30
}

/// Translation provider configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct TranslateConfig {
    /// Base URL of the translation endpoint host.
    #[serde(default = "default_translate_base_url")]
    pub base_url: String,

    /// Texts longer than this many characters are truncated before sending.
    #[serde(default = "default_translate_max_chars")]
    pub max_chars: usize,

    /// Transport-level timeout for a single HTTP call.
    #[serde(default = "default_translate_http_timeout_secs")]
    pub http_timeout_secs: u64,

    /// Public web page used for browser fallback links.
    #[serde(default = "default_browser_base_url")]
    pub browser_base_url: String,
}

impl Default for TranslateConfig {
    fn default() -> Self {
        Self {
            base_url: default_translate_base_url(),
            max_chars: default_translate_max_chars(),
            http_timeout_secs: default_translate_http_timeout_secs(),
            browser_base_url: default_browser_base_url(),
        }
    }
}

fn default_translate_base_url() -> String {
    "https://translate.googleapis.com".to_string()
}

fn default_translate_max_chars() -> usize {
    1000
}

fn default_translate_http_timeout_secs() -> u64 {
    10
}

fn default_browser_base_url() -> String {
    "https://translate.google.no/".to_string()
}

/// Request time budget and completion retry policy.
///
/// All durations are in milliseconds and measured from the moment the
/// request enters the pipeline.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct PipelineConfig {
    /// Overall per-request ceiling.
    #[serde(default = "default_request_ceiling_ms")]
    pub request_ceiling_ms: u64,

    /// Completion is skipped when more than this much time has elapsed.
    #[serde(default = "default_completion_gate_ms")]
    pub completion_gate_ms: u64,

    /// Hard timeout for a single completion call.
    #[serde(default = "default_completion_timeout_ms")]
    pub completion_timeout_ms: u64,

    /// Reply translation is skipped when less than this much time remains.
    #[serde(default = "default_skip_translation_below_ms")]
    pub skip_translation_below_ms: u64,

    /// Long replies are shortened before translation when less than this remains.
    #[serde(default = "default_shorten_translation_below_ms")]
    pub shorten_translation_below_ms: u64,

    /// Length (in characters) long replies are shortened to.
    #[serde(default = "default_shorten_translation_chars")]
    pub shorten_translation_chars: usize,

    /// Total completion attempts when the provider reports a rate limit.
    #[serde(default = "default_rate_limit_attempts")]
    pub rate_limit_attempts: u32,

    /// Base backoff; attempt `n` waits `n * base`.
    #[serde(default = "default_rate_limit_base_delay_ms")]
    pub rate_limit_base_delay_ms: u64,

    /// Reply language used when the request does not name one.
    #[serde(default)]
    pub default_reply_lang: LanguageCode,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            request_ceiling_ms: default_request_ceiling_ms(),
            completion_gate_ms: default_completion_gate_ms(),
            completion_timeout_ms: default_completion_timeout_ms(),
            skip_translation_below_ms: default_skip_translation_below_ms(),
            shorten_translation_below_ms: default_shorten_translation_below_ms(),
            shorten_translation_chars: default_shorten_translation_chars(),
            rate_limit_attempts: default_rate_limit_attempts(),
            rate_limit_base_delay_ms: default_rate_limit_base_delay_ms(),
            default_reply_lang: LanguageCode::default(),
        }
    }
}

impl PipelineConfig {
    pub fn request_ceiling(&self) -> Duration {
        Duration::from_millis(self.request_ceiling_ms)
    }

    pub fn completion_gate(&self) -> Duration {
        Duration::from_millis(self.completion_gate_ms)
    }

    pub fn completion_timeout(&self) -> Duration {
        Duration::from_millis(self.completion_timeout_ms)
    }

    pub fn skip_translation_below(&self) -> Duration {
        Duration::from_millis(self.skip_translation_below_ms)
    }

    pub fn shorten_translation_below(&self) -> Duration {
        Duration::from_millis(self.shorten_translation_below_ms)
    }

    pub fn rate_limit_base_delay(&self) -> Duration {
        Duration::from_millis(self.rate_limit_base_delay_ms)
    }
}

fn default_request_ceiling_ms() -> u64 {
    9_000
}

fn default_completion_gate_ms() -> u64 {
    5_000
}

fn default_completion_timeout_ms() -> u64 {
    3_000
}

fn default_skip_translation_below_ms() -> u64 {
    2_000
}

fn default_shorten_translation_below_ms() -> u64 {
    3_000
}

fn default_shorten_translation_chars() -> usize {
    500
}

fn default_rate_limit_attempts() -> u32 {
    2
}

fn default_rate_limit_base_delay_ms() -> u64 {
    1_000
}
