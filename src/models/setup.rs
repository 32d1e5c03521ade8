// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Setup-progress checklist shown on the dashboard.
//!
//! Combines what the local store says about the signed-in user with the
//! backend's `/api/health/setup-status` report. Backend fields that are
//! missing, or a backend that could not be reached, count as not completed.

use super::AccountSnapshot;
use serde::{Deserialize, Serialize};
use serde_json::Value;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// Backend setup report. Only the fields the checklist reads are modeled.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SetupStatus {
    #[serde(default)]
    pub backend: BackendSetup,
    #[serde(default)]
    pub database: DatabaseSetup,
    #[serde(default)]
    pub overall_progress: f64,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct BackendSetup {
    #[serde(default)]
    pub configured: bool,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct DatabaseSetup {
    #[serde(default)]
    pub connected: bool,
}

impl SetupStatus {
    /// Parse the backend's raw report; an unexpected shape yields `None`.
    pub fn from_value(value: Value) -> Option<Self> {
        match serde_json::from_value(value) {
            Ok(status) => Some(status),
            Err(e) => {
                tracing::warn!(error = %e, "Unrecognized setup status from backend");
                None
            }
        }
    }
}

/// One line of the checklist.
#[derive(Debug, Clone, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct SetupCheck {
    pub name: String,
    pub completed: bool,
    pub description: String,
}

/// Checklist plus overall percentage (0-100).
#[derive(Debug, Clone, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct SetupProgress {
    pub checks: Vec<SetupCheck>,
    pub progress: f64,
}

fn check(name: &str, completed: bool, description: &str) -> SetupCheck {
    SetupCheck {
        name: name.to_string(),
        completed,
        description: description.to_string(),
    }
}

/// Build the checklist. `status` is `None` when the backend was unreachable.
///
/// Progress is the larger of the backend's own `overall_progress` and the
/// share of checks completed here.
pub fn setup_progress(snapshot: &AccountSnapshot, status: Option<&SetupStatus>) -> SetupProgress {
    let checks = vec![
        check(
            "Frontend Authentication",
            snapshot.is_authenticated(),
            "User successfully logged in",
        ),
        check(
            "Beag Script Integration",
            snapshot.access_token.as_deref().is_some_and(|t| !t.is_empty()),
            "Auth widget loaded and handed over an access token",
        ),
        check(
            "Backend Configuration",
            status.is_some_and(|s| s.backend.configured),
            "Backend environment variables configured",
        ),
        check(
            "Database Connection",
            status.is_some_and(|s| s.database.connected),
            "Database connected and accessible",
        ),
        check(
            "Active Subscription",
            snapshot.subscription_status().is_active(),
            "User has active subscription",
        ),
    ];

    let completed = checks.iter().filter(|c| c.completed).count();
    let local = completed as f64 / checks.len() as f64 * 100.0;
    let reported = status.map_or(0.0, |s| s.overall_progress);

    SetupProgress {
        checks,
        progress: local.max(reported),
    }
}
