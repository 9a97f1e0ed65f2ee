// SPDX-FileCopyrightText: 2026 Selam Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The request pipeline: detect, pre-translate, complete and post-translate
//! under one per-request time budget.

use std::sync::Arc;
use std::time::Duration;

use selam_config::SelamConfig;
use selam_core::types::{ChatRequest, TranslateRequest};
use selam_core::{CompletionAdapter, LanguageCode, SelamError, TranslationAdapter};
use tracing::{Instrument, debug, info, info_span, warn};

use crate::budget::TimeBudget;
use crate::completion::{CompletionClient, CompletionFailure, CompletionSettings};
use crate::translation::{ELLIPSIS, TranslationClient};
use crate::health::{self, AdapterHealth, HEALTH_CHECK_TIMEOUT};
use crate::{detector, link, prompt};

pub const NO_MESSAGE: &str = "No message provided";
pub const NO_TEXT: &str = "No text provided";

/// Substituted for the completion when the request is already too slow.
pub const APOLOGY: &str =
    "I apologize, but the request is taking too long. Please try again with a shorter message.";

pub const RATE_LIMITED_MESSAGE: &str = "The AI service is temporarily rate-limited. Please wait a moment and try again in a few seconds.";

pub const TIMED_OUT_MESSAGE: &str =
    "The request timed out. Please try with a shorter message or try again.";

pub const UNAVAILABLE_MESSAGE: &str = "Sorry, I couldn't get a response from the AI. This might be due to:\n- API key issues\n- Network connectivity\n- API quota limits\n- Request timeout\n\nPlease try again with a shorter message.";

pub const TRANSLATION_COMPLETED: &str = "Translation completed!";
pub const OPEN_IN_BROWSER: &str = "Opening Google Translate in browser...";

/// Why a chat request did not succeed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineFailure {
    /// The message was empty; nothing was sent anywhere.
    Validation,
    RateLimited,
    TimedOut,
    /// Any other completion failure, including an empty reply.
    Unavailable,
}

impl PipelineFailure {
    /// The message shown to the caller.
    pub fn user_message(self) -> &'static str {
        match self {
            Self::Validation => NO_MESSAGE,
            Self::RateLimited => RATE_LIMITED_MESSAGE,
            Self::TimedOut => TIMED_OUT_MESSAGE,
            Self::Unavailable => UNAVAILABLE_MESSAGE,
        }
    }
}

impl From<&CompletionFailure> for PipelineFailure {
    fn from(failure: &CompletionFailure) -> Self {
        match failure {
            CompletionFailure::RateLimited => Self::RateLimited,
            CompletionFailure::TimedOut => Self::TimedOut,
            CompletionFailure::Empty | CompletionFailure::Unavailable(_) => Self::Unavailable,
        }
    }
}

/// Outcome of one chat request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineResult {
    pub request_id: String,
    pub success: bool,
    /// Text returned to the user; empty on failure.
    pub final_text: String,
    /// The English completion before any reply translation.
    pub raw_completion_text: Option<String>,
    pub detected_input_language: LanguageCode,
    pub reply_lang: LanguageCode,
    pub error_message: Option<String>,
    pub failure: Option<PipelineFailure>,
    pub elapsed_time: Duration,
}

impl PipelineResult {
    fn failed(
        request_id: String,
        failure: PipelineFailure,
        detected: LanguageCode,
        reply_lang: LanguageCode,
        elapsed: Duration,
    ) -> Self {
        Self {
            request_id,
            success: false,
            final_text: String::new(),
            raw_completion_text: None,
            detected_input_language: detected,
            reply_lang,
            error_message: Some(failure.user_message().to_string()),
            failure: Some(failure),
            elapsed_time: elapsed,
        }
    }
}

/// Outcome of a direct translation request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslateResult {
    pub translation: Option<String>,
    pub original: String,
    pub reply_lang: LanguageCode,
    pub source_lang: LanguageCode,
    /// Browser link that performs the same translation.
    pub translate_url: String,
    pub message: &'static str,
}

/// Timing thresholds applied by the orchestrator.
#[derive(Debug, Clone)]
pub struct PipelinePolicy {
    pub request_ceiling: Duration,
    pub completion_gate: Duration,
    pub skip_translation_below: Duration,
    pub shorten_translation_below: Duration,
    pub shorten_translation_chars: usize,
    pub default_reply_lang: LanguageCode,
    pub browser_base_url: String,
}

impl PipelinePolicy {
    pub fn from_config(config: &SelamConfig) -> Self {
        let p = &config.pipeline;
        Self {
            request_ceiling: p.request_ceiling(),
            completion_gate: p.completion_gate(),
            skip_translation_below: p.skip_translation_below(),
            shorten_translation_below: p.shorten_translation_below(),
            shorten_translation_chars: p.shorten_translation_chars,
            default_reply_lang: p.default_reply_lang.clone(),
            browser_base_url: config.translate.browser_base_url.clone(),
        }
    }
}

/// Millisecond wall-clock timestamp used as a request id.
pub fn new_request_id() -> String {
    chrono::Utc::now().timestamp_millis().to_string()
}

/// Sequences the translation and completion clients for each request.
pub struct Pipeline {
    translator: TranslationClient,
    completion: CompletionClient,
    policy: PipelinePolicy,
}

impl Pipeline {
    pub fn new(
        translator: TranslationClient,
        completion: CompletionClient,
        policy: PipelinePolicy,
    ) -> Self {
        Self {
            translator,
            completion,
            policy,
        }
    }

    /// Wires both adapters with the settings from `config`.
    pub fn from_config(
        config: &SelamConfig,
        translator: Arc<dyn TranslationAdapter>,
        completion: Arc<dyn CompletionAdapter>,
    ) -> Self {
        Self::new(
            TranslationClient::new(translator, config.translate.max_chars),
            CompletionClient::new(completion, CompletionSettings::from_config(config)),
            PipelinePolicy::from_config(config),
        )
    }

    pub fn completion(&self) -> &CompletionClient {
        &self.completion
    }

    pub fn translator(&self) -> &TranslationClient {
        &self.translator
    }

    pub fn policy(&self) -> &PipelinePolicy {
        &self.policy
    }

    /// Probes both adapters concurrently, each bounded by
    /// [`HEALTH_CHECK_TIMEOUT`].
    pub async fn health(&self) -> Vec<AdapterHealth> {
        let (translation, completion) = tokio::join!(
            health::check_adapter(self.translator.adapter().as_ref(), HEALTH_CHECK_TIMEOUT),
            health::check_adapter(self.completion.adapter().as_ref(), HEALTH_CHECK_TIMEOUT),
        );
        vec![translation, completion]
    }

    /// Runs a chat request under a fresh millisecond-timestamp request id.
    pub async fn run_chat(&self, request: ChatRequest) -> PipelineResult {
        self.run_chat_with_id(request, new_request_id()).await
    }

    /// Runs a chat request under a caller-supplied request id.
    pub async fn run_chat_with_id(&self, request: ChatRequest, request_id: String) -> PipelineResult {
        let span = info_span!("chat", request_id = %request_id);
        self.chat_inner(request, request_id).instrument(span).await
    }

    async fn chat_inner(&self, request: ChatRequest, request_id: String) -> PipelineResult {
        let budget = TimeBudget::start(self.policy.request_ceiling);
        let reply_lang = request.reply_lang_or(&self.policy.default_reply_lang);
        let message = request.message.trim();

        if message.is_empty() {
            info!("rejected chat request with empty message");
            return PipelineResult::failed(
                request_id,
                PipelineFailure::Validation,
                LanguageCode::Auto,
                reply_lang,
                budget.elapsed(),
            );
        }

        let detected = detector::detect(message);
        info!(
            chars = message.chars().count(),
            detected = detected.language().display_name(),
            reply_lang = reply_lang.display_name(),
            "chat request"
        );

        let model_input = if detected.is_tigrinya() {
            match self
                .translator
                .translate(message, &LanguageCode::Tigrinya, &LanguageCode::English)
                .await
            {
                Some(english) => english,
                None => {
                    warn!("input translation failed, sending original text");
                    message.to_string()
                }
            }
        } else {
            message.to_string()
        };

        let raw = if budget.elapsed() > self.policy.completion_gate {
            warn!(
                elapsed_ms = budget.elapsed().as_millis() as u64,
                "skipping completion, request budget nearly spent"
            );
            APOLOGY.to_string()
        } else {
            let prompt = prompt::build_prompt(&model_input);
            match self.completion.complete(&prompt, &budget).await {
                Ok(text) => text,
                Err(failure) => {
                    warn!(
                        error = %failure,
                        elapsed_ms = budget.elapsed().as_millis() as u64,
                        "completion failed"
                    );
                    return PipelineResult::failed(
                        request_id,
                        PipelineFailure::from(&failure),
                        detected.language(),
                        reply_lang,
                        budget.elapsed(),
                    );
                }
            }
        };

        let final_text = if reply_lang == LanguageCode::English {
            raw.clone()
        } else {
            self.translate_reply(&raw, &reply_lang, &budget).await
        };

        let elapsed = budget.elapsed();
        info!(elapsed_ms = elapsed.as_millis() as u64, "chat request completed");
        PipelineResult {
            request_id,
            success: true,
            final_text,
            raw_completion_text: Some(raw),
            detected_input_language: detected.language(),
            reply_lang,
            error_message: None,
            failure: None,
            elapsed_time: elapsed,
        }
    }

    /// Translates the English reply, degrading by remaining budget.
    async fn translate_reply(
        &self,
        english: &str,
        reply_lang: &LanguageCode,
        budget: &TimeBudget,
    ) -> String {
        let remaining = budget.remaining();
        if remaining < self.policy.skip_translation_below {
            warn!(
                remaining_ms = remaining.as_millis() as u64,
                "skipping reply translation"
            );
            return english.to_string();
        }

        let limit = self.policy.shorten_translation_chars;
        let text = if remaining < self.policy.shorten_translation_below
            && english.chars().count() > limit
        {
            debug!(
                remaining_ms = remaining.as_millis() as u64,
                chars = limit,
                "shortening reply before translation"
            );
            let mut short: String = english.chars().take(limit).collect();
            short.push_str(ELLIPSIS);
            short
        } else {
            english.to_string()
        };

        match self
            .translator
            .translate(&text, &LanguageCode::English, reply_lang)
            .await
        {
            Some(translated) => translated,
            None => {
                warn!(reply_lang = %reply_lang, "reply translation failed, returning English");
                english.to_string()
            }
        }
    }

    /// Translates free text directly and builds the matching browser link.
    pub async fn translate_text(
        &self,
        request: TranslateRequest,
    ) -> Result<TranslateResult, SelamError> {
        translate_text(&self.translator, &self.policy, request).await
    }
}

/// Translates `request.text` without touching the completion backend.
///
/// Shared by [`Pipeline::translate_text`] and callers that only hold a
/// translation client.
pub async fn translate_text(
    translator: &TranslationClient,
    policy: &PipelinePolicy,
    request: TranslateRequest,
) -> Result<TranslateResult, SelamError> {
    let text = request.text.trim();
    if text.is_empty() {
        return Err(SelamError::Validation(NO_TEXT.to_string()));
    }
    let reply_lang = request.reply_lang_or(&policy.default_reply_lang);
    let source = detector::detect(text).language();

    let translation = translator.translate(text, &source, &reply_lang).await;
    let translate_url =
        link::translate_url(&policy.browser_base_url, text, &source, &reply_lang);
    let message = if translation.is_some() {
        TRANSLATION_COMPLETED
    } else {
        OPEN_IN_BROWSER
    };
    debug!(
        source = %source,
        target = %reply_lang,
        translated = translation.is_some(),
        "translate request"
    );

    Ok(TranslateResult {
        translation,
        original: text.to_string(),
        reply_lang,
        source_lang: source,
        translate_url,
        message,
    })
}
