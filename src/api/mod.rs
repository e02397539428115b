// Copyright (c) MySocial Team
// SPDX-License-Identifier: Apache-2.0

pub mod auth;
mod handlers;
mod routes;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::config::ServerConfig;
use crate::services::TweakNowService;

pub use auth::{Caller, TokenRegistry};

/// Shared state handed to every handler
#[derive(Clone)]
pub struct AppState {
    pub service: TweakNowService,
    pub tokens: Arc<TokenRegistry>,
}

impl AppState {
    pub fn new(service: TweakNowService, tokens: TokenRegistry) -> Self {
        Self {
            service,
            tokens: Arc::new(tokens),
        }
    }
}

/// Build the router with tracing; CORS is added by the server
pub fn create_router(state: AppState) -> Router {
    routes::router()
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}

/// Start the API server
pub async fn start_api_server(state: AppState, config: &ServerConfig) -> Result<()> {
    let mut app = create_router(state);

    if config.enable_cors {
        app = app.layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        );
    }

    let addr = format!("{}:{}", config.host, config.port)
        .parse::<SocketAddr>()
        .context("Invalid SERVER_HOST/SERVER_PORT")?;

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    info!("Starting API server on {}", addr);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("API server error")?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        return;
    }
    info!("Shutdown signal received, initiating graceful shutdown");
}
