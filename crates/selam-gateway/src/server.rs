// SPDX-FileCopyrightText: 2026 Selam Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Gateway HTTP server built on axum.
//!
//! Sets up routes, middleware, and shared state for the gateway.

use std::any::Any;
use std::sync::Arc;

use axum::{
    Json, Router,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use selam_config::ServerConfig;
use selam_core::SelamError;
use selam_pipeline::Pipeline;
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::handlers::{self, ErrorResponse};

/// Shared state for axum request handlers.
#[derive(Clone)]
pub struct GatewayState {
    pub pipeline: Arc<Pipeline>,
    /// Process start time for uptime calculation.
    pub start_time: std::time::Instant,
}

impl GatewayState {
    pub fn new(pipeline: Arc<Pipeline>) -> Self {
        Self {
            pipeline,
            start_time: std::time::Instant::now(),
        }
    }
}

/// Builds the application router.
///
/// - POST /chat, POST /api/chat
/// - POST /translate, POST /api/translate
/// - GET /health
pub fn router(state: GatewayState) -> Router {
    Router::new()
        .route("/chat", post(handlers::post_chat))
        .route("/api/chat", post(handlers::post_chat))
        .route("/translate", post(handlers::post_translate))
        .route("/api/translate", post(handlers::post_translate))
        .route("/health", get(handlers::get_health))
        .with_state(state)
        .layer(CatchPanicLayer::custom(panic_response))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

/// Turns a handler panic into a JSON 500.
pub(crate) fn panic_response(panic: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = panic.downcast_ref::<&str>() {
        (*s).to_string()
    } else {
        "unknown panic".to_string()
    };
    tracing::error!(detail = %detail, "request handler panicked");

    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorResponse {
            success: false,
            error: format!("Internal server error: {detail}"),
            request_id: None,
        }),
    )
        .into_response()
}

/// Binds `host:port` and serves until `cancel` fires.
pub async fn start_server(
    config: &ServerConfig,
    state: GatewayState,
    cancel: CancellationToken,
) -> Result<(), SelamError> {
    let addr = format!("{}:{}", config.host, config.port);
    let listener = TcpListener::bind(&addr)
        .await
        .map_err(|e| SelamError::Internal(format!("failed to bind gateway to {addr}: {e}")))?;

    tracing::info!("Gateway server listening on {addr}");
    serve(listener, state, cancel).await
}

/// Serves on an already-bound listener, draining in-flight requests on cancel.
pub async fn serve(
    listener: TcpListener,
    state: GatewayState,
    cancel: CancellationToken,
) -> Result<(), SelamError> {
    axum::serve(listener, router(state))
        .with_graceful_shutdown(async move {
            cancel.cancelled().await;
            tracing::info!("gateway shutting down");
        })
        .await
        .map_err(|e| SelamError::Internal(format!("gateway server error: {e}")))
}
