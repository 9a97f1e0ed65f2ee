// SPDX-FileCopyrightText: 2026 Selam Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP gateway for the Selam chat relay.
//!
//! Exposes the pipeline over JSON endpoints with permissive CORS, request
//! tracing, and panic-to-500 conversion.

pub mod handlers;
pub mod server;

pub use server::{GatewayState, router, serve, start_server};
