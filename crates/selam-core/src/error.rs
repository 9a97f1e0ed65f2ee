// SPDX-FileCopyrightText: 2026 Selam Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the Selam chat relay.

use thiserror::Error;

/// Substrings that mark a provider error as a rate-limit or quota condition.
///
/// Matched case-insensitively against the error message.
const RATE_LIMIT_MARKERS: &[&str] = &[
    "quota",
    "rate limit",
    "resource exhausted",
    "resource_exhausted",
    "resourceexhausted",
];

/// The primary error type used across all Selam adapter traits and core operations.
#[derive(Debug, Error)]
pub enum SelamError {
    /// Configuration errors (missing API key, invalid header values).
    #[error("configuration error: {0}")]
    Config(String),

    /// Completion provider errors (API failure, quota, model not found).
    #[error("provider error: {message}")]
    Provider {
        message: String,
        /// HTTP status returned by the provider, when the failure came from a response.
        status: Option<u16>,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Translation provider errors (network failure, unexpected response shape).
    #[error("translation error: {message}")]
    Translation {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Caller input rejected before any external call.
    #[error("validation error: {0}")]
    Validation(String),

    /// Operation timed out.
    #[error("operation timed out after {duration:?}")]
    Timeout { duration: std::time::Duration },

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}

impl SelamError {
    /// Shorthand for a provider error without an HTTP status or source.
    pub fn provider(message: impl Into<String>) -> Self {
        Self::Provider {
            message: message.into(),
            status: None,
            source: None,
        }
    }

    /// Returns true when this error signals a rate-limit or quota condition.
    ///
    /// Recognized by HTTP status 429 or by any of the textual markers
    /// ("quota", "rate limit", "resource exhausted") in the message.
    pub fn is_rate_limit(&self) -> bool {
        match self {
            Self::Provider {
                message, status, ..
            } => *status == Some(429) || contains_rate_limit_marker(message),
            other => contains_rate_limit_marker(&other.to_string()),
        }
    }
}

/// Case-insensitive scan for rate-limit markers, including a bare "429".
pub fn contains_rate_limit_marker(text: &str) -> bool {
    let lowered = text.to_lowercase();
    lowered.contains("429") || RATE_LIMIT_MARKERS.iter().any(|m| lowered.contains(m))
}
