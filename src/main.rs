// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! SaaS Dashboard Server
//!
//! Serves the account dashboard for a subscription product and keeps the
//! backend user store in step with identities from the auth widget.

use saas_dashboard::{
    config::Config,
    services::BackendClient,
    storage::{FileStore, MemoryStore},
    AppState,
};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize structured JSON logging
    init_logging()?;

    // Load configuration from environment
    let config = Config::from_env()?;
    tracing::info!(
        port = config.port,
        backend = %config.backend_url,
        timeout_ms = config.backend_timeout.as_millis() as u64,
        "Starting SaaS dashboard"
    );

    // Persistent local store (written by the auth widget handoff)
    let local_store = Arc::new(FileStore::open(&config.local_store_path)?);
    tracing::info!(path = %local_store.path().display(), "Local store opened");

    // Session store lives as long as this process
    let session_store = Arc::new(MemoryStore::new());

    let backend = Arc::new(BackendClient::new(
        &config.backend_url,
        config.backend_timeout,
    )?);

    let state = Arc::new(AppState::new(
        config.clone(),
        local_store,
        session_store,
        backend,
    ));

    // Build router
    let app = saas_dashboard::routes::create_router(state);

    // Start server
    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(address = %addr, "Server listening");

    axum::serve(listener, app).await?;
    Ok(())
}

/// Initialize structured JSON logging.
fn init_logging() -> Result<(), Box<dyn std::error::Error>> {
    let format = tracing_subscriber::fmt::layer()
        .json()
        .with_target(false)
        .with_current_span(true)
        .flatten_event(true);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("saas_dashboard=debug".parse()?)
                .add_directive("info".parse()?),
        )
        .with(format)
        .init();
    Ok(())
}
