// SPDX-FileCopyrightText: 2026 Selam Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Integration tests for the Selam configuration system.

use std::io::Write;

use selam_config::diagnostic::ConfigError;
use selam_config::{load_and_validate_path, load_and_validate_str, load_config_from_str};
use selam_core::LanguageCode;

#[test]
fn empty_config_yields_reference_policy() {
    let config = load_config_from_str("").expect("empty TOML is valid");
    assert_eq!(config.server.host, "127.0.0.1");
    assert_eq!(config.server.port, 5001);
    assert_eq!(config.gemini.default_model, "models/gemini-2.0-flash");
    assert_eq!(config.gemini.preferred_models.len(), 3);
    assert_eq!(config.gemini.max_output_tokens, 1024);
    assert_eq!(config.translate.max_chars, 1000);
    assert_eq!(config.pipeline.request_ceiling_ms, 9_000);
    assert_eq!(config.pipeline.completion_gate_ms, 5_000);
    assert_eq!(config.pipeline.completion_timeout_ms, 3_000);
    assert_eq!(config.pipeline.skip_translation_below_ms, 2_000);
    assert_eq!(config.pipeline.shorten_translation_below_ms, 3_000);
    assert_eq!(config.pipeline.shorten_translation_chars, 500);
    assert_eq!(config.pipeline.rate_limit_attempts, 2);
    assert_eq!(config.pipeline.default_reply_lang, LanguageCode::Tigrinya);
    assert!(config.gemini.api_key.is_none());
}

#[test]
fn full_config_overrides_defaults() {
    let toml = r#"
[server]
host = "0.0.0.0"
port = 8080
log_level = "debug"

[gemini]
api_key = "AIza-test"
preferred_models = ["models/gemini-2.5-flash"]
temperature = 0.2

[translate]
base_url = "http://localhost:9999"
max_chars = 200

[pipeline]
request_ceiling_ms = 12000
default_reply_lang = "en"
"#;
    let config = load_and_validate_str(toml).expect("valid config");
    assert_eq!(config.server.port, 8080);
    assert_eq!(config.gemini.api_key.as_deref(), Some("AIza-test"));
    assert_eq!(config.gemini.preferred_models, vec!["models/gemini-2.5-flash"]);
    assert_eq!(config.translate.max_chars, 200);
    assert_eq!(config.pipeline.request_ceiling(), std::time::Duration::from_secs(12));
    assert_eq!(config.pipeline.default_reply_lang, LanguageCode::English);
    // untouched keys keep their defaults
    assert_eq!(config.pipeline.completion_gate_ms, 5_000);
}

#[test]
fn unknown_key_suggests_correction() {
    let toml = r#"
[pipeline]
request_celing_ms = 9000
"#;
    let errors = load_and_validate_str(toml).expect_err("unknown key must be rejected");
    assert_eq!(errors.len(), 1);
    match &errors[0] {
        ConfigError::UnknownKey {
            key, suggestion, ..
        } => {
            assert_eq!(key, "request_celing_ms");
            assert_eq!(suggestion.as_deref(), Some("request_ceiling_ms"));
        }
        other => panic!("expected UnknownKey, got {other:?}"),
    }
}

#[test]
fn unknown_section_rejected() {
    let err = load_config_from_str("[storage]\npath = \"x\"\n").expect_err("unknown section");
    assert!(err.to_string().contains("storage"), "got: {err}");
}

#[test]
fn wrong_type_reports_key_path() {
    let errors = load_and_validate_str("[server]\nport = \"eighty\"\n").expect_err("bad type");
    match &errors[0] {
        ConfigError::InvalidType { key, .. } => assert_eq!(key, "server.port"),
        other => panic!("expected InvalidType, got {other:?}"),
    }
}

#[test]
fn semantic_validation_runs_after_parse() {
    let toml = r#"
[pipeline]
completion_gate_ms = 10000
"#;
    let errors = load_and_validate_str(toml).expect_err("gate beyond ceiling");
    assert!(matches!(errors[0], ConfigError::Validation { .. }));
}

#[test]
fn config_file_on_disk_is_loaded() {
    let mut file = tempfile::NamedTempFile::new().expect("temp file");
    writeln!(file, "[server]\nport = 6001\n\n[translate]\nmax_chars = 42").expect("write");

    let config = load_and_validate_path(file.path()).expect("valid file");
    assert_eq!(config.translate.max_chars, 42);
}

#[test]
fn api_key_is_redacted_in_debug_output() {
    let config = load_config_from_str("[gemini]\napi_key = \"AIza-secret\"\n").expect("valid");
    let debug = format!("{:?}", config.gemini);
    assert!(!debug.contains("AIza-secret"));
    assert!(debug.contains("[redacted]"));
}
