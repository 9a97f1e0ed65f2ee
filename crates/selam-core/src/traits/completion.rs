// SPDX-FileCopyrightText: 2026 Selam Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Completion adapter trait for LLM text-generation providers (Gemini, etc.).

use async_trait::async_trait;

use crate::error::SelamError;
use crate::traits::adapter::PluginAdapter;
use crate::types::{CompletionResponse, GenerationConfig, ModelInfo};

/// Adapter for a text-completion provider.
#[async_trait]
pub trait CompletionAdapter: PluginAdapter {
    /// Lists the models the provider currently exposes.
    async fn list_models(&self) -> Result<Vec<ModelInfo>, SelamError>;

    /// Generates a single completion for `prompt` with model `model`.
    async fn generate(
        &self,
        model: &str,
        prompt: &str,
        config: &GenerationConfig,
    ) -> Result<CompletionResponse, SelamError>;
}
