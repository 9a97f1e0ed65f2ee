// SPDX-FileCopyrightText: 2026 Selam Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! One-shot `selam chat` and `selam translate` commands.

use selam_config::SelamConfig;
use selam_core::types::{ChatRequest, LanguageCode, TranslateRequest};
use selam_core::SelamError;
use selam_pipeline::orchestrator::translate_text;
use selam_pipeline::{PipelineFailure, PipelinePolicy, PipelineResult, TranslateResult};

use crate::serve::{build_pipeline, build_translator, init_tracing};

/// Runs a single chat request and prints the reply to stdout.
pub async fn run_chat(
    config: &SelamConfig,
    message: String,
    reply_lang: Option<String>,
) -> Result<(), SelamError> {
    init_tracing(&config.server.log_level);
    let pipeline = build_pipeline(config)?;

    let request = ChatRequest {
        message,
        reply_lang: reply_lang.map(LanguageCode::from),
    };
    let result = pipeline.run_chat(request).await;
    println!("{}", chat_output(result)?);
    Ok(())
}

/// Runs a single translation and prints it with the browser link.
///
/// Only the translation backend is contacted, so no Gemini key is required.
pub async fn run_translate(
    config: &SelamConfig,
    text: String,
    reply_lang: Option<String>,
) -> Result<(), SelamError> {
    init_tracing(&config.server.log_level);
    println!("{}", translate_once(config, text, reply_lang).await?);
    Ok(())
}

async fn translate_once(
    config: &SelamConfig,
    text: String,
    reply_lang: Option<String>,
) -> Result<String, SelamError> {
    let translator = build_translator(config)?;
    let policy = PipelinePolicy::from_config(config);
    let request = TranslateRequest {
        text,
        reply_lang: reply_lang.map(LanguageCode::from),
    };
    let result = translate_text(&translator, &policy, request).await?;
    Ok(translate_output(&result))
}

fn chat_output(result: PipelineResult) -> Result<String, SelamError> {
    if result.success {
        return Ok(result.final_text);
    }
    let message = result
        .error_message
        .unwrap_or_else(|| "Unknown error".to_string());
    Err(match result.failure {
        Some(PipelineFailure::Validation) => SelamError::Validation(message),
        _ => SelamError::provider(message),
    })
}

fn translate_output(result: &TranslateResult) -> String {
    match &result.translation {
        Some(text) => format!("{text}\n\n{}", result.translate_url),
        None => format!("{}\n{}", result.message, result.translate_url),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn result(success: bool, failure: Option<PipelineFailure>) -> PipelineResult {
        PipelineResult {
            request_id: "1".into(),
            success,
            final_text: if success { "ሰላም".into() } else { String::new() },
            raw_completion_text: success.then(|| "Hello".to_string()),
            detected_input_language: LanguageCode::Auto,
            reply_lang: LanguageCode::Tigrinya,
            error_message: failure.map(|f| f.user_message().to_string()),
            failure,
            elapsed_time: Duration::from_millis(5),
        }
    }

    #[test]
    fn successful_chat_prints_final_text() {
        assert_eq!(chat_output(result(true, None)).unwrap(), "ሰላም");
    }

    #[test]
    fn failed_chat_becomes_error() {
        let err = chat_output(result(false, Some(PipelineFailure::Validation))).unwrap_err();
        assert!(matches!(err, SelamError::Validation(ref m) if m == "No message provided"));

        let err = chat_output(result(false, Some(PipelineFailure::RateLimited))).unwrap_err();
        assert!(err.to_string().contains("rate-limited"));
    }

    #[test]
    fn missing_translation_prints_browser_hint() {
        let out = translate_output(&TranslateResult {
            translation: None,
            original: "hello".into(),
            reply_lang: LanguageCode::Tigrinya,
            source_lang: LanguageCode::Auto,
            translate_url: "https://translate.google.no/?sl=auto&tl=ti&text=hello&op=translate".into(),
            message: "Opening Google Translate in browser...",
        });
        assert!(out.starts_with("Opening Google Translate in browser...\n"));
        assert!(out.ends_with("op=translate"));
    }

    #[tokio::test]
    async fn translate_runs_without_gemini_key() {
        use wiremock::matchers::{method, path, query_param};
        use wiremock::{Mock, MockServer, ResponseTemplate};

        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/translate_a/single"))
            .and(query_param("tl", "ti"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_string(r#"[[["ሰላም","hello",null,null,10]],null,"en"]"#),
            )
            .expect(1)
            .mount(&server)
            .await;

        let mut config = SelamConfig::default();
        config.gemini.api_key = Some("   ".into());
        config.translate.base_url = server.uri();

        let out = translate_once(&config, "hello".into(), Some("ti".into()))
            .await
            .unwrap();
        assert!(out.starts_with("ሰላም\n\n"), "{out}");
        assert!(out.contains("sl=auto&tl=ti"), "{out}");
    }
}
