// SPDX-FileCopyrightText: 2026 Selam Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test utilities for Selam integration tests.
//!
//! # Components
//!
//! - [`MockTranslator`] - translation provider with queued outcomes and call capture
//! - [`MockCompletion`] - completion backend with queued outcomes, model listing and call capture
//! - [`TestHarness`] - a [`selam_pipeline::Pipeline`] wired to both mocks

pub mod harness;
pub mod mock_completion;
pub mod mock_translator;

pub use harness::TestHarness;
pub use mock_completion::{CompletionOutcome, GenerateCall, MockCompletion};
pub use mock_translator::{MockTranslator, TranslateCall, TranslateOutcome};
