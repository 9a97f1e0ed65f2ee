// SPDX-FileCopyrightText: 2026 Selam Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mock translation adapter for deterministic testing.
//!
//! `MockTranslator` implements `TranslationAdapter` with queued outcomes and
//! records every call, so tests can assert exactly which language pairs the
//! pipeline asked for.

use std::collections::VecDeque;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::Mutex;

use selam_core::traits::{PluginAdapter, TranslationAdapter};
use selam_core::types::{AdapterType, HealthStatus, LanguageCode};
use selam_core::SelamError;

/// What the mock does for one `translate` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TranslateOutcome {
    /// Provider answered with this text.
    Text(String),
    /// Provider answered with nothing usable.
    Empty,
    /// Provider call failed with this message.
    Fail(String),
}

/// One recorded `translate` invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslateCall {
    pub text: String,
    pub source: String,
    pub target: String,
}

/// A mock translation provider.
///
/// Outcomes are popped from a FIFO queue. When the queue is empty the mock
/// answers `"[{target}] {text}"`, which keeps assertions readable.
#[derive(Default)]
pub struct MockTranslator {
    outcomes: Arc<Mutex<VecDeque<TranslateOutcome>>>,
    calls: Arc<Mutex<Vec<TranslateCall>>>,
    delay: Option<Duration>,
}

impl MockTranslator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a mock pre-loaded with the given outcomes.
    pub fn with_outcomes(outcomes: Vec<TranslateOutcome>) -> Self {
        Self {
            outcomes: Arc::new(Mutex::new(VecDeque::from(outcomes))),
            ..Self::default()
        }
    }

    /// Every call sleeps for `delay` (tokio time) before answering.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub async fn push(&self, outcome: TranslateOutcome) {
        self.outcomes.lock().await.push_back(outcome);
    }

    /// All calls seen so far, in order.
    pub async fn calls(&self) -> Vec<TranslateCall> {
        self.calls.lock().await.clone()
    }

    pub async fn call_count(&self) -> usize {
        self.calls.lock().await.len()
    }
}

#[async_trait]
impl PluginAdapter for MockTranslator {
    fn name(&self) -> &str {
        "mock-translator"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Translation
    }

    async fn health_check(&self) -> Result<HealthStatus, SelamError> {
        Ok(HealthStatus::Healthy)
    }
}

#[async_trait]
impl TranslationAdapter for MockTranslator {
    async fn translate(
        &self,
        text: &str,
        source: &LanguageCode,
        target: &LanguageCode,
    ) -> Result<Option<String>, SelamError> {
        self.calls.lock().await.push(TranslateCall {
            text: text.to_string(),
            source: source.code().to_string(),
            target: target.code().to_string(),
        });

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        let next = self.outcomes.lock().await.pop_front();
        match next {
            Some(TranslateOutcome::Text(t)) => Ok(Some(t)),
            Some(TranslateOutcome::Empty) => Ok(None),
            Some(TranslateOutcome::Fail(message)) => Err(SelamError::Translation {
                message,
                source: None,
            }),
            None => Ok(Some(format!("[{target}] {text}"))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn default_answer_tags_target() {
        let mock = MockTranslator::new();
        let out = mock
            .translate("hello", &LanguageCode::English, &LanguageCode::Tigrinya)
            .await
            .unwrap();
        assert_eq!(out.as_deref(), Some("[ti] hello"));
    }

    #[tokio::test]
    async fn queued_outcomes_then_default() {
        let mock = MockTranslator::with_outcomes(vec![
            TranslateOutcome::Fail("boom".into()),
            TranslateOutcome::Empty,
        ]);
        let en = LanguageCode::English;
        let ti = LanguageCode::Tigrinya;
        assert!(mock.translate("a", &ti, &en).await.is_err());
        assert_eq!(mock.translate("b", &ti, &en).await.unwrap(), None);
        assert!(mock.translate("c", &ti, &en).await.unwrap().is_some());

        let calls = mock.calls().await;
        assert_eq!(calls.len(), 3);
        assert_eq!(calls[0].source, "ti");
        assert_eq!(calls[0].target, "en");
    }
}
