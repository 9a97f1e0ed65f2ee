// SPDX-FileCopyrightText: 2026 Selam Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Translate-augmented completion pipeline.
//!
//! A chat request flows through [`detector`], an optional input translation,
//! the [`completion`] client, and an optional reply translation, all under a
//! per-request [`budget::TimeBudget`]. Translation failures degrade to the
//! untranslated text; completion failures end the request.

pub mod budget;
pub mod completion;
pub mod detector;
pub mod health;
pub mod link;
pub mod orchestrator;
pub mod prompt;
pub mod translation;

pub use budget::TimeBudget;
pub use completion::{CompletionClient, CompletionFailure, CompletionSettings};
pub use detector::detect;
pub use health::AdapterHealth;
pub use orchestrator::{Pipeline, PipelineFailure, PipelinePolicy, PipelineResult, TranslateResult};
pub use translation::TranslationClient;
