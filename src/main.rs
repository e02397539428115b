// Copyright (c) MySocial Team
// SPDX-License-Identifier: Apache-2.0

use anyhow::Result;
use dotenv::dotenv;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use tweaknow::api::{self, AppState, TokenRegistry};
use tweaknow::config::{Config, StorageBackend};
use tweaknow::db::init_database;
use tweaknow::metrics::Metrics;
use tweaknow::services::TweakNowService;
use tweaknow::store::{MemoryStore, PgStore, Store};

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file if present
    dotenv().ok();

    init_tracing();

    // Load configuration
    let config = Config::init()?;
    info!("Initialized configuration");

    let store: Arc<dyn Store> = match config.storage.backend {
        StorageBackend::Postgres => {
            let db = Arc::new(init_database(&config.database).await?);
            info!("Connected to database");
            Arc::new(PgStore::new(db))
        }
        StorageBackend::Memory => {
            info!("Using in-memory storage; data is lost on exit");
            Arc::new(MemoryStore::new())
        }
    };

    let tokens = TokenRegistry::new(&config.auth.tokens);
    if tokens.is_empty() {
        tracing::warn!("AUTH_TOKENS is empty; every authenticated route will answer 401");
    }

    let metrics = Arc::new(Metrics::new()?);
    let service = TweakNowService::new(store, metrics);

    api::start_api_server(AppState::new(service, tokens), &config.server).await?;

    info!("TweakNow shutdown complete");
    Ok(())
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::new(
        std::env::var("RUST_LOG").unwrap_or_else(|_| "info,tweaknow=debug".into()),
    );

    let json = std::env::var("LOG_FORMAT")
        .map(|format| format.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    if json {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }
}
