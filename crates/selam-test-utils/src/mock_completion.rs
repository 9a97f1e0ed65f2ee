// SPDX-FileCopyrightText: 2026 Selam Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mock completion adapter for deterministic testing.

use std::collections::VecDeque;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::Mutex;

use selam_core::traits::{CompletionAdapter, PluginAdapter};
use selam_core::types::{
    AdapterType, CompletionResponse, GenerationConfig, HealthStatus, ModelInfo,
};
use selam_core::SelamError;

/// What the mock does for one `generate` call.
#[derive(Debug, Clone, PartialEq)]
pub enum CompletionOutcome {
    /// Reply through the direct `text` field.
    Text(String),
    /// Reply through the first candidate's first part.
    Candidate(String),
    /// A response with neither shape populated.
    Empty,
    /// A 429 provider error.
    RateLimited,
    /// A non-rate-limit provider error with this message.
    Fail(String),
    /// Sleep for the duration, then reply with the text.
    Slow(Duration, String),
}

/// One recorded `generate` invocation.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerateCall {
    pub model: String,
    pub prompt: String,
    pub config: GenerationConfig,
}

/// A mock LLM backend.
///
/// `generate` outcomes are popped from a FIFO queue; an empty queue answers
/// `"mock response"`. `list_models` returns the configured listing or fails
/// when none was set with [`MockCompletion::with_models`].
pub struct MockCompletion {
    models: Option<Vec<ModelInfo>>,
    list_delay: Option<Duration>,
    health: HealthStatus,
    outcomes: Arc<Mutex<VecDeque<CompletionOutcome>>>,
    calls: Arc<Mutex<Vec<GenerateCall>>>,
    list_calls: Arc<Mutex<usize>>,
}

impl MockCompletion {
    /// A backend whose model listing fails.
    pub fn new() -> Self {
        Self {
            models: None,
            list_delay: None,
            health: HealthStatus::Healthy,
            outcomes: Arc::new(Mutex::new(VecDeque::new())),
            calls: Arc::new(Mutex::new(Vec::new())),
            list_calls: Arc::new(Mutex::new(0)),
        }
    }

    pub fn with_outcomes(outcomes: Vec<CompletionOutcome>) -> Self {
        let mock = Self::new();
        Self {
            outcomes: Arc::new(Mutex::new(VecDeque::from(outcomes))),
            ..mock
        }
    }

    /// Make `list_models` succeed with this listing.
    pub fn with_models(mut self, models: Vec<ModelInfo>) -> Self {
        self.models = Some(models);
        self
    }

    pub async fn push(&self, outcome: CompletionOutcome) {
        self.outcomes.lock().await.push_back(outcome);
    }

    pub async fn calls(&self) -> Vec<GenerateCall> {
        self.calls.lock().await.clone()
    }

    pub async fn call_count(&self) -> usize {
        self.calls.lock().await.len()
    }

    /// Make `list_models` sleep before answering.
    pub fn with_list_delay(mut self, delay: Duration) -> Self {
        self.list_delay = Some(delay);
        self
    }

    /// Status reported by `health_check`.
    pub fn with_health(mut self, health: HealthStatus) -> Self {
        self.health = health;
        self
    }

    pub async fn list_call_count(&self) -> usize {
        *self.list_calls.lock().await
    }
}

impl Default for MockCompletion {
    fn default() -> Self {
        Self::new()
    }
}

/// A listed model that supports `generateContent`.
pub fn generative_model(name: &str) -> ModelInfo {
    ModelInfo {
        name: name.to_string(),
        supported_generation_methods: vec!["generateContent".to_string()],
    }
}

/// A listed model that only supports embeddings.
pub fn embedding_model(name: &str) -> ModelInfo {
    ModelInfo {
        name: name.to_string(),
        supported_generation_methods: vec!["embedContent".to_string()],
    }
}

#[async_trait]
impl PluginAdapter for MockCompletion {
    fn name(&self) -> &str {
        "mock-completion"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Completion
    }

    async fn health_check(&self) -> Result<HealthStatus, SelamError> {
        Ok(self.health.clone())
    }
}

#[async_trait]
impl CompletionAdapter for MockCompletion {
    async fn list_models(&self) -> Result<Vec<ModelInfo>, SelamError> {
        *self.list_calls.lock().await += 1;
        if let Some(delay) = self.list_delay {
            tokio::time::sleep(delay).await;
        }
        self.models
            .clone()
            .ok_or_else(|| SelamError::provider("model listing unavailable"))
    }

    async fn generate(
        &self,
        model: &str,
        prompt: &str,
        config: &GenerationConfig,
    ) -> Result<CompletionResponse, SelamError> {
        self.calls.lock().await.push(GenerateCall {
            model: model.to_string(),
            prompt: prompt.to_string(),
            config: *config,
        });

        let next = self.outcomes.lock().await.pop_front();
        match next.unwrap_or_else(|| CompletionOutcome::Text("mock response".into())) {
            CompletionOutcome::Text(t) => Ok(CompletionResponse::from_text(t)),
            CompletionOutcome::Candidate(t) => Ok(CompletionResponse::from_candidate(t)),
            CompletionOutcome::Empty => Ok(CompletionResponse::default()),
            CompletionOutcome::RateLimited => Err(SelamError::Provider {
                message: "Resource has been exhausted (e.g. check quota).".into(),
                status: Some(429),
                source: None,
            }),
            CompletionOutcome::Fail(message) => Err(SelamError::Provider {
                message,
                status: Some(500),
                source: None,
            }),
            CompletionOutcome::Slow(delay, t) => {
                tokio::time::sleep(delay).await;
                Ok(CompletionResponse::from_text(t))
            }
        }
    }
}
