// SPDX-FileCopyrightText: 2026 Selam Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Completion client: model selection, rate-limit retry and a hard deadline
//! around a [`CompletionAdapter`].

use std::sync::Arc;
use std::time::Duration;

use arc_swap::ArcSwapOption;
use selam_config::SelamConfig;
use selam_core::types::{GenerationConfig, ModelInfo};
use selam_core::CompletionAdapter;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::budget::TimeBudget;

/// Generation method a model must advertise to be selectable.
pub const GENERATE_CONTENT: &str = "generateContent";

/// Why a completion produced no text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CompletionFailure {
    /// Every attempt was rejected with a rate-limit or quota error.
    #[error("completion provider is rate limited")]
    RateLimited,
    /// The call did not finish within its deadline.
    #[error("completion timed out")]
    TimedOut,
    /// The provider answered without any text.
    #[error("completion provider returned no text")]
    Empty,
    /// Any other provider failure.
    #[error("completion provider unavailable: {0}")]
    Unavailable(String),
}

/// Tunables for [`CompletionClient`].
#[derive(Debug, Clone)]
pub struct CompletionSettings {
    /// Tried in order against the provider's model listing.
    pub preferred_models: Vec<String>,
    /// Used when the listing fails or offers nothing usable.
    pub default_model: String,
    pub generation: GenerationConfig,
    /// Upper bound for a single provider call.
    pub call_timeout: Duration,
    /// Total attempts when the provider reports a rate limit.
    pub max_attempts: u32,
    /// Attempt `n` backs off for `n * base_delay` before retrying.
    pub base_delay: Duration,
}

impl CompletionSettings {
    pub fn from_config(config: &SelamConfig) -> Self {
        Self {
            preferred_models: config.gemini.preferred_models.clone(),
            default_model: config.gemini.default_model.clone(),
            generation: GenerationConfig {
                max_output_tokens: config.gemini.max_output_tokens,
                temperature: config.gemini.temperature,
            },
            call_timeout: config.pipeline.completion_timeout(),
            max_attempts: config.pipeline.rate_limit_attempts.max(1),
            base_delay: config.pipeline.rate_limit_base_delay(),
        }
    }
}

impl Default for CompletionSettings {
    fn default() -> Self {
        Self::from_config(&SelamConfig::default())
    }
}

/// Picks the model to use from a listing, honoring preference order.
pub fn choose_model(models: &[ModelInfo], preferred: &[String]) -> Option<String> {
    let usable = |m: &&ModelInfo| m.supports(GENERATE_CONTENT);
    preferred
        .iter()
        .find(|name| models.iter().filter(usable).any(|m| &m.name == *name))
        .cloned()
        .or_else(|| models.iter().find(usable).map(|m| m.name.clone()))
}

/// A deadline hit after a rate-limit rejection still reports the rate limit.
fn deadline_failure(rate_limited: bool) -> CompletionFailure {
    if rate_limited {
        CompletionFailure::RateLimited
    } else {
        CompletionFailure::TimedOut
    }
}

/// Wraps a completion provider.
///
/// The selected model is memoized in a lock-free cell shared by all
/// requests on this client; concurrent writers race benignly and the last
/// store wins. Any failed [`complete`](Self::complete) clears the memo so the
/// next request re-runs selection.
pub struct CompletionClient {
    adapter: Arc<dyn CompletionAdapter>,
    settings: CompletionSettings,
    model: ArcSwapOption<String>,
}

impl CompletionClient {
    pub fn new(adapter: Arc<dyn CompletionAdapter>, settings: CompletionSettings) -> Self {
        Self {
            adapter,
            settings,
            model: ArcSwapOption::empty(),
        }
    }

    pub fn adapter(&self) -> &Arc<dyn CompletionAdapter> {
        &self.adapter
    }

    pub fn settings(&self) -> &CompletionSettings {
        &self.settings
    }

    /// The memoized model, if one has been selected.
    pub fn current_model(&self) -> Option<String> {
        self.model.load_full().map(|m| m.as_ref().clone())
    }

    /// Forgets the memoized model.
    pub fn reset_model(&self) {
        self.model.store(None);
    }

    /// Returns the memoized model, selecting and storing one if needed.
    ///
    /// The listing call is bounded like a generate call; a listing that
    /// fails or outlives `min(call_timeout, remaining budget)` falls back to
    /// the configured default model.
    pub async fn select_model(&self, budget: &TimeBudget) -> String {
        if let Some(model) = self.model.load_full() {
            return model.as_ref().clone();
        }

        let limit = budget.cap(self.settings.call_timeout);
        let fallback = &self.settings.default_model;
        let chosen = if limit.is_zero() {
            warn!(fallback = %fallback, "no budget left for model listing");
            fallback.clone()
        } else {
            let adapter = Arc::clone(&self.adapter);
            let handle = tokio::spawn(async move { adapter.list_models().await });
            match tokio::time::timeout(limit, handle).await {
                Ok(Ok(Ok(models))) => match choose_model(&models, &self.settings.preferred_models) {
                    Some(name) => name,
                    None => {
                        warn!(
                            listed = models.len(),
                            fallback = %fallback,
                            "no listed model supports generateContent"
                        );
                        fallback.clone()
                    }
                },
                Ok(Ok(Err(e))) => {
                    warn!(error = %e, fallback = %fallback, "model listing failed");
                    fallback.clone()
                }
                Ok(Err(join_err)) => {
                    warn!(error = %join_err, fallback = %fallback, "model listing task failed");
                    fallback.clone()
                }
                Err(_) => {
                    warn!(
                        timeout_ms = limit.as_millis() as u64,
                        fallback = %fallback,
                        "model listing timed out"
                    );
                    fallback.clone()
                }
            }
        };

        info!(model = %chosen, "selected completion model");
        self.model.store(Some(Arc::new(chosen.clone())));
        chosen
    }

    /// Generates a reply to `prompt` within the caller's `budget`.
    ///
    /// Each provider call runs on its own task and is awaited for at most
    /// `min(call_timeout, remaining budget)`. On timeout the task is detached,
    /// not cancelled, so the provider may still bill for it.
    pub async fn complete(
        &self,
        prompt: &str,
        budget: &TimeBudget,
    ) -> Result<String, CompletionFailure> {
        let result = self.attempt_all(prompt, budget).await;
        if result.is_err() {
            self.reset_model();
        }
        result
    }

    async fn attempt_all(
        &self,
        prompt: &str,
        budget: &TimeBudget,
    ) -> Result<String, CompletionFailure> {
        let model = self.select_model(budget).await;
        let max_attempts = self.settings.max_attempts.max(1);
        let mut rate_limited = false;

        for attempt in 1..=max_attempts {
            let limit = budget.cap(self.settings.call_timeout);
            if limit.is_zero() {
                warn!(attempt, model = %model, "no budget left for completion");
                return Err(deadline_failure(rate_limited));
            }

            let adapter = Arc::clone(&self.adapter);
            let call_model = model.clone();
            let call_prompt = prompt.to_string();
            let config = self.settings.generation;
            let handle = tokio::spawn(async move {
                adapter.generate(&call_model, &call_prompt, &config).await
            });

            let outcome = match tokio::time::timeout(limit, handle).await {
                Err(_) => {
                    warn!(
                        attempt,
                        model = %model,
                        timeout_ms = limit.as_millis() as u64,
                        elapsed_ms = budget.elapsed().as_millis() as u64,
                        "completion timed out; the abandoned call may still consume provider quota"
                    );
                    return Err(deadline_failure(rate_limited));
                }
                Ok(Err(join_err)) => {
                    warn!(attempt, model = %model, error = %join_err, "completion task failed");
                    return Err(CompletionFailure::Unavailable(join_err.to_string()));
                }
                Ok(Ok(outcome)) => outcome,
            };

            match outcome {
                Ok(response) => {
                    return match response.extract_text() {
                        Some(text) => {
                            debug!(
                                attempt,
                                model = %model,
                                elapsed_ms = budget.elapsed().as_millis() as u64,
                                chars = text.chars().count(),
                                "completion succeeded"
                            );
                            Ok(text)
                        }
                        None => {
                            warn!(attempt, model = %model, "completion returned no text");
                            Err(CompletionFailure::Empty)
                        }
                    };
                }
                Err(e) if e.is_rate_limit() => {
                    rate_limited = true;
                    warn!(
                        attempt,
                        max_attempts,
                        model = %model,
                        elapsed_ms = budget.elapsed().as_millis() as u64,
                        error = %e,
                        "completion rate limited"
                    );
                    if attempt == max_attempts {
                        break;
                    }
                    let delay = self.settings.base_delay * attempt;
                    if delay >= budget.remaining() {
                        debug!(
                            delay_ms = delay.as_millis() as u64,
                            "backoff would exceed the request budget"
                        );
                        break;
                    }
                    tokio::time::sleep(delay).await;
                }
                Err(e) => {
                    warn!(
                        attempt,
                        model = %model,
                        elapsed_ms = budget.elapsed().as_millis() as u64,
                        error = %e,
                        "completion failed"
                    );
                    return Err(CompletionFailure::Unavailable(e.to_string()));
                }
            }
        }

        Err(CompletionFailure::RateLimited)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use selam_test_utils::{CompletionOutcome, MockCompletion};

    fn model(name: &str, methods: &[&str]) -> ModelInfo {
        ModelInfo {
            name: name.to_string(),
            supported_generation_methods: methods.iter().map(|m| m.to_string()).collect(),
        }
    }

    fn preferred() -> Vec<String> {
        CompletionSettings::default().preferred_models
    }

    #[test]
    fn preference_order_wins_over_listing_order() {
        let models = vec![
            model("models/gemini-2.5-flash", &["generateContent"]),
            model("models/gemini-flash-latest", &["generateContent"]),
        ];
        assert_eq!(
            choose_model(&models, &preferred()).as_deref(),
            Some("models/gemini-flash-latest")
        );
    }

    #[test]
    fn preferred_model_without_generate_is_skipped() {
        let models = vec![
            model("models/gemini-2.0-flash", &["embedContent"]),
            model("models/gemini-pro", &["generateContent"]),
        ];
        assert_eq!(
            choose_model(&models, &preferred()).as_deref(),
            Some("models/gemini-pro")
        );
    }

    #[test]
    fn nothing_usable_yields_none() {
        let models = vec![model("models/embedding-001", &["embedContent"])];
        assert_eq!(choose_model(&models, &preferred()), None);
        assert_eq!(choose_model(&[], &preferred()), None);
    }

    #[tokio::test(start_paused = true)]
    #[tracing_test::traced_test]
    async fn timeout_warns_about_abandoned_call() {
        let mock = Arc::new(MockCompletion::with_outcomes(vec![CompletionOutcome::Slow(
            Duration::from_secs(10),
            "late".into(),
        )]));
        let client = CompletionClient::new(mock, CompletionSettings::default());
        let budget = TimeBudget::start(Duration::from_secs(9));

        let err = client.complete("q", &budget).await.unwrap_err();

        assert_eq!(err, CompletionFailure::TimedOut);
        assert_eq!(budget.elapsed(), Duration::from_secs(3));
        assert!(logs_contain("may still consume provider quota"));
    }

    #[tokio::test(start_paused = true)]
    async fn call_deadline_capped_by_remaining_budget() {
        let mock = Arc::new(MockCompletion::with_outcomes(vec![CompletionOutcome::Slow(
            Duration::from_millis(2_500),
            "late".into(),
        )]));
        let client = CompletionClient::new(mock, CompletionSettings::default());
        let budget = TimeBudget::start(Duration::from_secs(2));

        let err = client.complete("q", &budget).await.unwrap_err();

        assert_eq!(err, CompletionFailure::TimedOut);
        assert_eq!(budget.elapsed(), Duration::from_secs(2));
    }

    #[tokio::test(start_paused = true)]
    async fn backoff_never_sleeps_past_budget() {
        let mock = Arc::new(MockCompletion::with_outcomes(vec![
            CompletionOutcome::RateLimited,
            CompletionOutcome::Text("unreached".into()),
        ]));
        let client = CompletionClient::new(Arc::clone(&mock) as _, CompletionSettings::default());
        let budget = TimeBudget::start(Duration::from_millis(800));

        let err = client.complete("q", &budget).await.unwrap_err();

        assert_eq!(err, CompletionFailure::RateLimited);
        assert_eq!(mock.call_count().await, 1);
        assert!(budget.elapsed() < Duration::from_millis(800));
    }

    #[tokio::test(start_paused = true)]
    async fn timeout_after_rate_limit_reports_rate_limit() {
        let mock = Arc::new(MockCompletion::with_outcomes(vec![
            CompletionOutcome::RateLimited,
            CompletionOutcome::Slow(Duration::from_secs(10), "late".into()),
        ]));
        let client = CompletionClient::new(Arc::clone(&mock) as _, CompletionSettings::default());
        let budget = TimeBudget::start(Duration::from_secs(9));

        let err = client.complete("q", &budget).await.unwrap_err();

        assert_eq!(err, CompletionFailure::RateLimited);
        assert_eq!(mock.call_count().await, 2);
        // One second of backoff plus the three-second call deadline.
        assert_eq!(budget.elapsed(), Duration::from_secs(4));
    }

    #[tokio::test(start_paused = true)]
    async fn slow_listing_is_cut_at_call_timeout() {
        let mock = Arc::new(
            MockCompletion::with_outcomes(vec![CompletionOutcome::Text("ok".into())])
                .with_models(vec![model("models/gemini-2.5-flash", &["generateContent"])])
                .with_list_delay(Duration::from_secs(30)),
        );
        let client = CompletionClient::new(Arc::clone(&mock) as _, CompletionSettings::default());
        let budget = TimeBudget::start(Duration::from_secs(9));

        let model = client.select_model(&budget).await;

        assert_eq!(model, "models/gemini-2.0-flash");
        assert_eq!(budget.elapsed(), Duration::from_secs(3));
    }

    #[test]
    fn settings_follow_config() {
        let settings = CompletionSettings::default();
        assert_eq!(settings.call_timeout, Duration::from_secs(3));
        assert_eq!(settings.max_attempts, 2);
        assert_eq!(settings.base_delay, Duration::from_secs(1));
        assert_eq!(settings.default_model, "models/gemini-2.0-flash");
    }
}
