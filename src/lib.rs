// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! SaaS Dashboard: account shell for a subscription product
//!
//! This crate serves the dashboard's account and billing views from the
//! local store populated by the authentication widget, makes sure a backend
//! user exists for each signed-in identity, and proxies subscription lookups
//! to the backend API.

pub mod config;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod storage;
pub mod time_utils;

use config::Config;
use services::{AccountService, ProvisioningReconciler, UserApi};
use std::sync::Arc;
use storage::KeyValueStore;

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub accounts: AccountService,
    pub reconciler: ProvisioningReconciler,
    pub api: Arc<dyn UserApi>,
}

impl AppState {
    /// Wire the services over the given stores and backend API.
    pub fn new(
        config: Config,
        local_store: Arc<dyn KeyValueStore>,
        session_store: Arc<dyn KeyValueStore>,
        api: Arc<dyn UserApi>,
    ) -> Self {
        let reconciler = ProvisioningReconciler::new(
            api.clone(),
            session_store,
            config.provisioning_race_delay,
        );

        Self {
            config,
            accounts: AccountService::new(local_store),
            reconciler,
            api,
        }
    }
}
