// SPDX-FileCopyrightText: 2026 Selam Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Translation client: source pinning, truncation and a single retry around
//! a [`TranslationAdapter`].
//!
//! Translation is a soft dependency. Every failure path ends in `None`, and
//! callers keep whatever text they already had.

use std::sync::Arc;

use selam_core::{LanguageCode, TranslationAdapter};
use tokio::time::Instant;
use tracing::{debug, warn};

use crate::detector;

/// Marker appended to text cut down to a length limit.
pub const ELLIPSIS: &str = "...";

/// Default provider input limit, in characters.
pub const DEFAULT_MAX_CHARS: usize = 1000;

/// Cuts `text` to its first `max_chars` characters plus [`ELLIPSIS`].
///
/// Text at or under the limit is returned unchanged. Counts Unicode scalar
/// values, so multi-byte scripts are never split mid-character.
pub fn truncate_chars(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((cut, _)) => {
            let mut out = String::with_capacity(cut + ELLIPSIS.len());
            out.push_str(&text[..cut]);
            out.push_str(ELLIPSIS);
            out
        }
        None => text.to_string(),
    }
}

/// Wraps a translation provider with the relay's retry and truncation policy.
#[derive(Clone)]
pub struct TranslationClient {
    adapter: Arc<dyn TranslationAdapter>,
    max_chars: usize,
}

impl TranslationClient {
    pub fn new(adapter: Arc<dyn TranslationAdapter>, max_chars: usize) -> Self {
        Self { adapter, max_chars }
    }

    pub fn adapter(&self) -> &Arc<dyn TranslationAdapter> {
        &self.adapter
    }

    pub fn max_chars(&self) -> usize {
        self.max_chars
    }

    /// Translates `text` from `source` into `target`.
    ///
    /// An `auto` source is re-checked with the detector and pinned to
    /// Tigrinya when Ge'ez script is present. A provider error triggers one
    /// retry with source `auto`; a blank answer does not.
    pub async fn translate(
        &self,
        text: &str,
        source: &LanguageCode,
        target: &LanguageCode,
    ) -> Option<String> {
        let source = if source.is_auto() {
            detector::detect(text).language()
        } else {
            source.clone()
        };
        let payload = truncate_chars(text, self.max_chars);
        let started = Instant::now();

        let mut attempt_source = source;
        for attempt in 1..=2u32 {
            match self
                .adapter
                .translate(&payload, &attempt_source, target)
                .await
            {
                Ok(Some(translated)) if !translated.trim().is_empty() => {
                    debug!(
                        attempt,
                        source = %attempt_source,
                        target = %target,
                        elapsed_ms = started.elapsed().as_millis() as u64,
                        "translation succeeded"
                    );
                    return Some(translated);
                }
                Ok(_) => {
                    warn!(
                        attempt,
                        source = %attempt_source,
                        target = %target,
                        elapsed_ms = started.elapsed().as_millis() as u64,
                        "translation provider returned no text"
                    );
                    return None;
                }
                Err(e) => {
                    warn!(
                        attempt,
                        source = %attempt_source,
                        target = %target,
                        elapsed_ms = started.elapsed().as_millis() as u64,
                        error = %e,
                        "translation failed"
                    );
                    attempt_source = LanguageCode::Auto;
                }
            }
        }
        None
    }
}
