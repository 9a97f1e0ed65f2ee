// SPDX-FileCopyrightText: 2026 Selam Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Common types used across adapter traits and the Selam pipeline.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Health status reported by adapter health checks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HealthStatus {
    /// Adapter is fully operational.
    Healthy,
    /// Adapter is operational but experiencing issues.
    Degraded(String),
    /// Adapter is not operational.
    Unhealthy(String),
}

/// Identifies the kind of external collaborator an adapter wraps.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
pub enum AdapterType {
    Translation,
    Completion,
}

// --- Languages ---

/// A language tag understood by the translation provider.
///
/// The fixed set covers the languages the relay is built around; any other
/// code is carried verbatim in [`LanguageCode::Other`] and passed through to
/// the provider untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum LanguageCode {
    English,
    #[default]
    Tigrinya,
    Norwegian,
    Arabic,
    Amharic,
    /// Let the provider detect the source language.
    Auto,
    Other(String),
}

impl LanguageCode {
    /// The wire code sent to the provider.
    pub fn code(&self) -> &str {
        match self {
            Self::English => "en",
            Self::Tigrinya => "ti",
            Self::Norwegian => "no",
            Self::Arabic => "ar",
            Self::Amharic => "am",
            Self::Auto => "auto",
            Self::Other(code) => code,
        }
    }

    /// Human-readable name, falling back to the raw code for unknown tags.
    pub fn display_name(&self) -> &str {
        match self {
            Self::English => "English",
            Self::Tigrinya => "Tigrinya",
            Self::Norwegian => "Norwegian",
            Self::Arabic => "Arabic",
            Self::Amharic => "Amharic",
            Self::Auto => "Auto-detect",
            Self::Other(code) => code,
        }
    }

    pub fn is_auto(&self) -> bool {
        matches!(self, Self::Auto)
    }
}

impl From<&str> for LanguageCode {
    fn from(code: &str) -> Self {
        let trimmed = code.trim();
        match trimmed.to_ascii_lowercase().as_str() {
            "en" => Self::English,
            "ti" => Self::Tigrinya,
            "no" => Self::Norwegian,
            "ar" => Self::Arabic,
            "am" => Self::Amharic,
            "auto" => Self::Auto,
            _ => Self::Other(trimmed.to_string()),
        }
    }
}

impl From<String> for LanguageCode {
    fn from(code: String) -> Self {
        Self::from(code.as_str())
    }
}

impl From<LanguageCode> for String {
    fn from(lang: LanguageCode) -> Self {
        lang.code().to_string()
    }
}

impl FromStr for LanguageCode {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from(s))
    }
}

impl fmt::Display for LanguageCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Outcome of script-based language detection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DetectionResult {
    /// At least one Ge'ez-block character was found.
    Tigrinya,
    /// No Ge'ez characters; the provider should auto-detect.
    Undetermined,
}

impl DetectionResult {
    /// The language code handed to the translation provider for this result.
    pub fn language(self) -> LanguageCode {
        match self {
            Self::Tigrinya => LanguageCode::Tigrinya,
            Self::Undetermined => LanguageCode::Auto,
        }
    }

    pub fn is_tigrinya(self) -> bool {
        matches!(self, Self::Tigrinya)
    }
}

// --- Requests ---

/// Picks the requested language, or `default` when none (or a blank code) was sent.
fn reply_lang_or(requested: Option<&LanguageCode>, default: &LanguageCode) -> LanguageCode {
    match requested {
        Some(lang) if !lang.code().is_empty() => lang.clone(),
        _ => default.clone(),
    }
}

/// A chat request after body normalization.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ChatRequest {
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub reply_lang: Option<LanguageCode>,
}

impl ChatRequest {
    pub fn new(message: impl Into<String>, reply_lang: LanguageCode) -> Self {
        Self {
            message: message.into(),
            reply_lang: Some(reply_lang),
        }
    }

    pub fn reply_lang_or(&self, default: &LanguageCode) -> LanguageCode {
        reply_lang_or(self.reply_lang.as_ref(), default)
    }
}

/// A request to translate free text into `reply_lang`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct TranslateRequest {
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub reply_lang: Option<LanguageCode>,
}

impl TranslateRequest {
    pub fn new(text: impl Into<String>, reply_lang: LanguageCode) -> Self {
        Self {
            text: text.into(),
            reply_lang: Some(reply_lang),
        }
    }

    pub fn reply_lang_or(&self, default: &LanguageCode) -> LanguageCode {
        reply_lang_or(self.reply_lang.as_ref(), default)
    }
}

// --- Completion provider types ---

/// A model advertised by the completion provider's listing endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelInfo {
    /// Fully-qualified model identifier, e.g. `models/gemini-2.0-flash`.
    pub name: String,
    /// Generation methods the model accepts, e.g. `generateContent`.
    pub supported_generation_methods: Vec<String>,
}

impl ModelInfo {
    pub fn supports(&self, method: &str) -> bool {
        self.supported_generation_methods.iter().any(|m| m == method)
    }
}

/// Sampling parameters forwarded with every completion call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GenerationConfig {
    pub max_output_tokens: u32,
    pub temperature: f32,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            max_output_tokens: 1024,
            temperature: 0.7,
        }
    }
}

/// A completion response in either of the two shapes providers return:
/// a direct `text` field, or a list of candidates with content parts.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompletionResponse {
    pub text: Option<String>,
    pub candidates: Vec<Candidate>,
}

/// One generated candidate.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Candidate {
    pub parts: Vec<String>,
}

impl CompletionResponse {
    /// Response carrying only a direct text field.
    pub fn from_text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            candidates: Vec::new(),
        }
    }

    /// Response carrying a single candidate with a single part.
    pub fn from_candidate(text: impl Into<String>) -> Self {
        Self {
            text: None,
            candidates: vec![Candidate {
                parts: vec![text.into()],
            }],
        }
    }

    /// Extracts the reply: trimmed direct text if non-empty, otherwise the
    /// first candidate's first part. `None` when neither is populated.
    pub fn extract_text(&self) -> Option<String> {
        let direct = self
            .text
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty());
        let text = match direct {
            Some(t) => t,
            None => self
                .candidates
                .first()
                .and_then(|c| c.parts.first())
                .map(|p| p.trim())
                .filter(|t| !t.is_empty())?,
        };
        Some(text.to_string())
    }
}
