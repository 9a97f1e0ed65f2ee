// SPDX-FileCopyrightText: 2026 Selam Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `selam serve`: wires the real adapters into the gateway and runs it
//! until SIGINT or SIGTERM.

use std::sync::Arc;

use selam_config::SelamConfig;
use selam_core::SelamError;
use selam_gateway::GatewayState;
use selam_gemini::GeminiProvider;
use selam_pipeline::{Pipeline, TranslationClient};
use selam_translate::GoogleTranslator;
use tracing::info;

use crate::shutdown;

/// Runs the `selam serve` command.
pub async fn run_serve(config: SelamConfig) -> Result<(), SelamError> {
    init_tracing(&config.server.log_level);

    info!(
        host = %config.server.host,
        port = config.server.port,
        "starting selam serve"
    );

    let pipeline = build_pipeline(&config)?;
    let cancel = shutdown::install_signal_handler();

    #[cfg(not(target_env = "msvc"))]
    let monitor = tokio::spawn(crate::memory::memory_monitor(cancel.clone()));

    let result =
        selam_gateway::start_server(&config.server, GatewayState::new(pipeline), cancel.clone())
            .await;

    // A bind failure returns before any signal; stop the background tasks too.
    cancel.cancel();
    #[cfg(not(target_env = "msvc"))]
    let _ = monitor.await;

    info!("selam stopped");
    result
}

/// Builds the pipeline over the Gemini and Google Translate adapters.
pub fn build_pipeline(config: &SelamConfig) -> Result<Arc<Pipeline>, SelamError> {
    let translator = Arc::new(GoogleTranslator::from_config(config)?);
    let completion = Arc::new(GeminiProvider::new(config)?);
    Ok(Arc::new(Pipeline::from_config(config, translator, completion)))
}

/// Builds only the translation client; no Gemini key is needed.
pub fn build_translator(config: &SelamConfig) -> Result<TranslationClient, SelamError> {
    let adapter = Arc::new(GoogleTranslator::from_config(config)?);
    Ok(TranslationClient::new(adapter, config.translate.max_chars))
}

/// Initializes the tracing subscriber with the given log level.
///
/// `RUST_LOG` takes precedence over the configured level. Output goes to
/// stderr so the one-shot commands keep stdout for their result.
pub fn init_tracing(log_level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("selam={log_level},warn")));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_names(false)
        .with_writer(std::io::stderr)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pipeline_builds_with_configured_key() {
        let mut config = SelamConfig::default();
        config.gemini.api_key = Some("test-key".into());
        let pipeline = build_pipeline(&config).unwrap();
        assert_eq!(pipeline.translator().max_chars(), 1000);
    }

    #[test]
    fn blank_configured_key_without_env_is_rejected() {
        // Only meaningful when the environment carries no key either.
        if std::env::var(selam_gemini::API_KEY_ENV).is_ok() {
            return;
        }
        let mut config = SelamConfig::default();
        config.gemini.api_key = Some("   ".into());
        let err = build_pipeline(&config).err().expect("expected build_pipeline to fail");
        assert!(matches!(err, SelamError::Config(_)));
    }

    #[test]
    fn translator_builds_without_gemini_key() {
        let mut config = SelamConfig::default();
        config.gemini.api_key = Some("   ".into());
        config.translate.max_chars = 250;
        let translator = build_translator(&config).unwrap();
        assert_eq!(translator.max_chars(), 250);
    }
}
