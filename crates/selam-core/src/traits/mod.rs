// SPDX-FileCopyrightText: 2026 Selam Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Adapter trait definitions for Selam's external collaborators.
//!
//! All adapters extend the [`PluginAdapter`] base trait and use
//! `#[async_trait]` for dynamic dispatch compatibility.

pub mod adapter;
pub mod completion;
pub mod translation;

pub use adapter::PluginAdapter;
pub use completion::CompletionAdapter;
pub use translation::TranslationAdapter;
