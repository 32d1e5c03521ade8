// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Landing, sign-in handoff and logout routes.

use axum::{
    extract::State,
    response::Redirect,
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;

use crate::error::Result;
use crate::AppState;

pub const DASHBOARD_PATH: &str = "/dashboard";
pub const LOGIN_PATH: &str = "/login";

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(landing))
        .route("/login/callback", post(login_callback))
        .route("/logout", post(logout))
}

/// Landing route: make sure the backend knows the signed-in user, then go
/// to the dashboard.
///
/// The reconciler is awaited so its session marker is written before the
/// redirect. Whatever it reports, the user always lands on the dashboard.
async fn landing(State(state): State<Arc<AppState>>) -> Redirect {
    let identity = state.accounts.identity().unwrap_or_else(|e| {
        tracing::warn!(error = %e, "Failed to read identity; skipping provisioning");
        None
    });

    let outcome = state.reconciler.reconcile(identity.as_deref()).await;
    tracing::debug!(?outcome, "Provisioning finished");

    Redirect::to(DASHBOARD_PATH)
}

/// Token data handed over by the auth widget after a successful sign-in.
#[derive(Deserialize)]
pub struct LoginCallbackBody {
    pub token_data: HashMap<String, Value>,
}

/// Persist the widget's token data, then re-enter through the landing route.
async fn login_callback(
    State(state): State<Arc<AppState>>,
    Json(body): Json<LoginCallbackBody>,
) -> Result<Redirect> {
    // Browser storage only holds strings; numbers etc. are stored in JSON form.
    let token_data: HashMap<String, String> = body
        .token_data
        .into_iter()
        .filter(|(_, value)| !value.is_null())
        .map(|(key, value)| match value {
            Value::String(s) => (key, s),
            other => (key, other.to_string()),
        })
        .collect();

    state.accounts.store_token_data(&token_data)?;
    Ok(Redirect::to("/"))
}

/// Clear the account keys and send the user back to sign-in.
async fn logout(State(state): State<Arc<AppState>>) -> Result<Redirect> {
    state.accounts.logout()?;
    Ok(Redirect::to(LOGIN_PATH))
}
