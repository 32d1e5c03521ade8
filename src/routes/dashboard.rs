// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Dashboard and billing views built from the local account keys.

use axum::{
    extract::State,
    response::{IntoResponse, Redirect, Response},
    routing::get,
    Json, Router,
};
use serde::Serialize;
use std::sync::Arc;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

use super::entry::LOGIN_PATH;
use crate::error::Result;
use crate::models::{
    plan_name, setup_progress, AccountSnapshot, SetupProgress, SetupStatus,
};
use crate::time_utils::format_display_date;
use crate::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/dashboard", get(get_dashboard))
        .route("/billing", get(get_billing))
}

// ─── Dashboard ───────────────────────────────────────────────

/// Subscription summary shown on the dashboard.
#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct DashboardResponse {
    pub app_name: String,
    pub email: String,
    pub plan_id: Option<String>,
    /// Friendly plan name, "Free" when no plan is stored
    pub plan_name: String,
    /// Raw status code, e.g. "PAID"
    pub status: String,
    /// Badge label, e.g. "Active"
    pub status_label: String,
    pub is_active: bool,
    pub start_date: String,
    pub end_date: String,
    pub billing_portal_url: String,
    pub setup: SetupProgress,
}

async fn get_dashboard(State(state): State<Arc<AppState>>) -> Result<Response> {
    let Some((email, snapshot)) = signed_in(&state)? else {
        return Ok(Redirect::to(LOGIN_PATH).into_response());
    };
    let status = snapshot.subscription_status();
    let setup = setup_progress(&snapshot, backend_setup_status(&state).await.as_ref());

    Ok(Json(DashboardResponse {
        app_name: state.config.app_name.clone(),
        email,
        plan_id: snapshot.plan_id.clone(),
        plan_name: plan_name(snapshot.plan_id.as_deref()),
        status: status.code().to_string(),
        status_label: status.label().to_string(),
        is_active: status.is_active(),
        start_date: format_display_date(snapshot.start_date.as_deref()),
        end_date: format_display_date(snapshot.end_date.as_deref()),
        billing_portal_url: state.config.billing_portal_url.clone(),
        setup,
    })
    .into_response())
}

/// Backend setup report; an unreachable backend just means nothing is
/// confirmed yet, so failures are logged and dropped.
async fn backend_setup_status(state: &AppState) -> Option<SetupStatus> {
    match state.api.setup_status().await {
        Ok(value) => SetupStatus::from_value(value),
        Err(e) => {
            tracing::warn!(error = %e, "Setup status unavailable");
            None
        }
    }
}

// ─── Billing ─────────────────────────────────────────────────

/// Billing page: current status plus the link out to the hosted portal.
#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct BillingResponse {
    pub email: String,
    pub plan_id: Option<String>,
    pub plan_name: String,
    pub status: String,
    pub status_label: String,
    pub is_active: bool,
    /// Next billing / expiry date
    pub end_date: String,
    pub billing_portal_url: String,
}

async fn get_billing(State(state): State<Arc<AppState>>) -> Result<Response> {
    let Some((email, snapshot)) = signed_in(&state)? else {
        return Ok(Redirect::to(LOGIN_PATH).into_response());
    };
    let status = snapshot.subscription_status();

    Ok(Json(BillingResponse {
        email,
        plan_id: snapshot.plan_id.clone(),
        plan_name: plan_name(snapshot.plan_id.as_deref()),
        status: status.code().to_string(),
        status_label: status.label().to_string(),
        is_active: status.is_active(),
        end_date: format_display_date(snapshot.end_date.as_deref()),
        billing_portal_url: state.config.billing_portal_url.clone(),
    })
    .into_response())
}

/// The snapshot and its email, or `None` when nobody is signed in.
fn signed_in(state: &AppState) -> Result<Option<(String, AccountSnapshot)>> {
    let snapshot = state.accounts.snapshot()?;
    if !snapshot.is_authenticated() {
        return Ok(None);
    }
    Ok(snapshot.email.clone().map(|email| (email, snapshot)))
}
