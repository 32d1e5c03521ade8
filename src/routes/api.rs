// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Backend API passthrough routes.
//!
//! Paths mirror the backend's so the frontend can call either. Backend 404s
//! come back as 404, other backend failures as 502.

use crate::error::Result;
use crate::models::UserSubscription;
use crate::AppState;
use axum::{
    extract::{Path, State},
    routing::{get, post},
    Json, Router,
};
use serde_json::Value;
use std::sync::Arc;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/users", get(list_users))
        .route("/api/users/by-email/{email}", get(get_user_by_email))
        .route("/api/users/sync/{user_id}", post(sync_user))
        .route("/api/subscriptions/check/{email}", get(check_subscription))
        .route("/api/subscriptions/cached/{email}", get(cached_subscription))
        .route("/api/subscriptions/sync-all", post(sync_all))
        .route("/api/setup-status", get(setup_status))
}

async fn list_users(State(state): State<Arc<AppState>>) -> Result<Json<Vec<UserSubscription>>> {
    Ok(Json(state.api.list_users().await?))
}

async fn get_user_by_email(
    State(state): State<Arc<AppState>>,
    Path(email): Path<String>,
) -> Result<Json<UserSubscription>> {
    Ok(Json(state.api.get_user_by_email(&email).await?))
}

async fn sync_user(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<i64>,
) -> Result<Json<Value>> {
    tracing::info!(user_id, "Syncing user subscription");
    Ok(Json(state.api.sync_user_subscription(user_id).await?))
}

async fn check_subscription(
    State(state): State<Arc<AppState>>,
    Path(email): Path<String>,
) -> Result<Json<Value>> {
    Ok(Json(state.api.check_subscription(&email).await?))
}

async fn cached_subscription(
    State(state): State<Arc<AppState>>,
    Path(email): Path<String>,
) -> Result<Json<Value>> {
    Ok(Json(state.api.cached_subscription(&email).await?))
}

async fn sync_all(State(state): State<Arc<AppState>>) -> Result<Json<Value>> {
    tracing::info!("Syncing all subscriptions");
    Ok(Json(state.api.sync_all_subscriptions().await?))
}

async fn setup_status(State(state): State<Arc<AppState>>) -> Result<Json<Value>> {
    Ok(Json(state.api.setup_status().await?))
}
