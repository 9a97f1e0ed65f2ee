// SPDX-FileCopyrightText: 2026 Selam Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Translation adapter trait for machine-translation providers.

use async_trait::async_trait;

use crate::error::SelamError;
use crate::traits::adapter::PluginAdapter;
use crate::types::LanguageCode;

/// Adapter for a machine-translation provider.
///
/// Implementations perform exactly one provider call per invocation.
/// Retry, truncation, and source-pinning policy live in the pipeline's
/// translation client, not here.
#[async_trait]
pub trait TranslationAdapter: PluginAdapter {
    /// Translates `text` from `source` (or [`LanguageCode::Auto`]) into `target`.
    ///
    /// Returns `Ok(None)` when the provider answered but produced no text.
    async fn translate(
        &self,
        text: &str,
        source: &LanguageCode,
        target: &LanguageCode,
    ) -> Result<Option<String>, SelamError>;
}
