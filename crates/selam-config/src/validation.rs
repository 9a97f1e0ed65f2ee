// SPDX-FileCopyrightText: 2026 Selam Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.
//!
//! Checks the constraints serde cannot express: non-empty addresses, numeric
//! ranges, and the ordering of the pipeline's timing thresholds.

use crate::diagnostic::ConfigError;
use crate::model::SelamConfig;

/// Validate a deserialized configuration for semantic correctness.
///
/// Collects every failure instead of stopping at the first one.
pub fn validate_config(config: &SelamConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();
    let mut fail = |message: String| errors.push(ConfigError::Validation { message });

    let host = config.server.host.trim();
    if host.is_empty() {
        fail("server.host must not be empty".to_string());
    } else if host.parse::<std::net::IpAddr>().is_err()
        && !host
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '.' || c == '-')
    {
        fail(format!(
            "server.host `{host}` is not a valid IP address or hostname"
        ));
    }

    let gemini = &config.gemini;
    if gemini.base_url.trim().is_empty() {
        fail("gemini.base_url must not be empty".to_string());
    }
    if gemini.default_model.trim().is_empty() {
        fail("gemini.default_model must not be empty".to_string());
    }
    if !(0.0..=2.0).contains(&gemini.temperature) {
        fail(format!(
            "gemini.temperature must be between 0.0 and 2.0, got {}",
            gemini.temperature
        ));
    }
    if gemini.max_output_tokens == 0 {
        fail("gemini.max_output_tokens must be greater than 0".to_string());
    }
    if gemini.http_timeout_secs == 0 {
        fail("gemini.http_timeout_secs must be greater than 0".to_string());
    }

    let translate = &config.translate;
    if translate.base_url.trim().is_empty() {
        fail("translate.base_url must not be empty".to_string());
    }
    if translate.max_chars == 0 {
        fail("translate.max_chars must be greater than 0".to_string());
    }
    if translate.http_timeout_secs == 0 {
        fail("translate.http_timeout_secs must be greater than 0".to_string());
    }

    let p = &config.pipeline;
    if p.request_ceiling_ms == 0 {
        fail("pipeline.request_ceiling_ms must be greater than 0".to_string());
    }
    if p.completion_timeout_ms == 0 {
        fail("pipeline.completion_timeout_ms must be greater than 0".to_string());
    }
    if p.rate_limit_attempts == 0 {
        fail("pipeline.rate_limit_attempts must be at least 1".to_string());
    }
    if p.shorten_translation_chars == 0 {
        fail("pipeline.shorten_translation_chars must be greater than 0".to_string());
    }
    if p.completion_gate_ms >= p.request_ceiling_ms {
        fail(format!(
            "pipeline.completion_gate_ms ({}) must be less than pipeline.request_ceiling_ms ({})",
            p.completion_gate_ms, p.request_ceiling_ms
        ));
    }
    if p.skip_translation_below_ms > p.shorten_translation_below_ms {
        fail(format!(
            "pipeline.skip_translation_below_ms ({}) must not exceed pipeline.shorten_translation_below_ms ({})",
            p.skip_translation_below_ms, p.shorten_translation_below_ms
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn messages(config: &SelamConfig) -> Vec<String> {
        match validate_config(config) {
            Ok(()) => Vec::new(),
            Err(errors) => errors.iter().map(|e| e.to_string()).collect(),
        }
    }

    #[test]
    fn defaults_are_valid() {
        assert!(validate_config(&SelamConfig::default()).is_ok());
    }

    #[test]
    fn empty_host_fails() {
        let mut config = SelamConfig::default();
        config.server.host = "  ".to_string();
        let msgs = messages(&config);
        assert_eq!(msgs.len(), 1);
        assert!(msgs[0].contains("server.host"));
    }

    #[test]
    fn hostname_and_ipv6_accepted() {
        let mut config = SelamConfig::default();
        config.server.host = "relay.local".to_string();
        assert!(validate_config(&config).is_ok());
        config.server.host = "::1".to_string();
        assert!(validate_config(&config).is_ok());
        config.server.host = "bad host!".to_string();
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn temperature_out_of_range_fails() {
        let mut config = SelamConfig::default();
        config.gemini.temperature = 2.5;
        let msgs = messages(&config);
        assert!(msgs.iter().any(|m| m.contains("gemini.temperature")));
    }

    #[test]
    fn gate_must_precede_ceiling() {
        let mut config = SelamConfig::default();
        config.pipeline.completion_gate_ms = 9_000;
        let msgs = messages(&config);
        assert!(msgs.iter().any(|m| m.contains("completion_gate_ms")));
    }

    #[test]
    fn translation_thresholds_must_be_ordered() {
        let mut config = SelamConfig::default();
        config.pipeline.skip_translation_below_ms = 4_000;
        let msgs = messages(&config);
        assert!(msgs.iter().any(|m| m.contains("skip_translation_below_ms")));
    }

    #[test]
    fn collects_all_errors() {
        let mut config = SelamConfig::default();
        config.server.host = String::new();
        config.translate.max_chars = 0;
        config.pipeline.rate_limit_attempts = 0;
        assert_eq!(messages(&config).len(), 3);
    }
}
