// SPDX-FileCopyrightText: 2026 Selam Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the Selam chat relay.
//!
//! This crate provides the foundational trait definitions, error types, and
//! common types used throughout the Selam workspace. The translation and
//! completion adapters implement traits defined here.

pub mod error;
pub mod payload;
pub mod traits;
pub mod types;

// Re-export key items at crate root for ergonomic imports.
pub use error::SelamError;
pub use payload::JsonPayload;
pub use types::{AdapterType, DetectionResult, HealthStatus, LanguageCode};

pub use traits::{CompletionAdapter, PluginAdapter, TranslationAdapter};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn selam_error_variants_render() {
        let config = SelamError::Config("missing key".into());
        assert_eq!(config.to_string(), "configuration error: missing key");

        let provider = SelamError::Provider {
            message: "bad model".into(),
            status: Some(404),
            source: None,
        };
        assert_eq!(provider.to_string(), "provider error: bad model");

        let translation = SelamError::Translation {
            message: "empty body".into(),
            source: None,
        };
        assert_eq!(translation.to_string(), "translation error: empty body");

        let timeout = SelamError::Timeout {
            duration: std::time::Duration::from_secs(3),
        };
        assert!(timeout.to_string().contains("3s"));

        let _validation = SelamError::Validation("No message provided".into());
        let _internal = SelamError::Internal("test".into());
    }

    #[test]
    fn adapter_type_round_trips_through_strings() {
        use std::str::FromStr;

        for variant in [AdapterType::Translation, AdapterType::Completion] {
            let s = variant.to_string();
            let parsed = AdapterType::from_str(&s).expect("should parse back");
            assert_eq!(variant, parsed);
        }
    }

    #[test]
    fn all_traits_are_exported() {
        fn _assert_plugin_adapter<T: PluginAdapter>() {}
        fn _assert_translation_adapter<T: TranslationAdapter>() {}
        fn _assert_completion_adapter<T: CompletionAdapter>() {}
    }
}
