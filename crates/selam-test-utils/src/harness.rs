// SPDX-FileCopyrightText: 2026 Selam Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test harness that assembles a [`Pipeline`] around mock adapters.
//!
//! Tests keep handles to both mocks so they can queue outcomes and inspect
//! the calls the pipeline made.

use std::sync::Arc;

use selam_config::SelamConfig;
use selam_core::types::{ChatRequest, LanguageCode};
use selam_pipeline::{Pipeline, PipelineResult};

use crate::mock_completion::{CompletionOutcome, MockCompletion};
use crate::mock_translator::{MockTranslator, TranslateOutcome};

/// Builder for a pipeline wired to mocks.
pub struct TestHarnessBuilder {
    config: SelamConfig,
    translator: MockTranslator,
    completion: MockCompletion,
}

impl TestHarnessBuilder {
    fn new() -> Self {
        Self {
            config: SelamConfig::default(),
            translator: MockTranslator::new(),
            completion: MockCompletion::new(),
        }
    }

    pub fn with_config(mut self, config: SelamConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_translations(mut self, outcomes: Vec<TranslateOutcome>) -> Self {
        self.translator = MockTranslator::with_outcomes(outcomes);
        self
    }

    /// Use a pre-built translator (e.g. one with a delay).
    pub fn with_translator(mut self, translator: MockTranslator) -> Self {
        self.translator = translator;
        self
    }

    pub fn with_completions(mut self, outcomes: Vec<CompletionOutcome>) -> Self {
        self.completion = MockCompletion::with_outcomes(outcomes);
        self
    }

    pub fn with_completion(mut self, completion: MockCompletion) -> Self {
        self.completion = completion;
        self
    }

    pub fn build(self) -> TestHarness {
        let translator = Arc::new(self.translator);
        let completion = Arc::new(self.completion);
        let pipeline = Pipeline::from_config(
            &self.config,
            Arc::clone(&translator) as _,
            Arc::clone(&completion) as _,
        );
        TestHarness {
            pipeline: Arc::new(pipeline),
            translator,
            completion,
            config: self.config,
        }
    }
}

/// A pipeline plus the mocks behind it.
pub struct TestHarness {
    pub pipeline: Arc<Pipeline>,
    pub translator: Arc<MockTranslator>,
    pub completion: Arc<MockCompletion>,
    pub config: SelamConfig,
}

impl TestHarness {
    pub fn builder() -> TestHarnessBuilder {
        TestHarnessBuilder::new()
    }

    /// Runs `message` through the pipeline with a fixed request id.
    pub async fn chat(&self, message: &str, reply_lang: LanguageCode) -> PipelineResult {
        self.pipeline
            .run_chat_with_id(ChatRequest::new(message, reply_lang), "test".to_string())
            .await
    }

    /// Total external calls made by the pipeline so far.
    pub async fn external_calls(&self) -> usize {
        self.translator.call_count().await
            + self.completion.call_count().await
            + self.completion.list_call_count().await
    }
}
