// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use async_trait::async_trait;
use saas_dashboard::config::Config;
use saas_dashboard::error::AppError;
use saas_dashboard::models::UserSubscription;
use saas_dashboard::routes::create_router;
use saas_dashboard::services::UserApi;
use saas_dashboard::storage::MemoryStore;
use saas_dashboard::AppState;
use serde_json::{json, Value};
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// Scripted backend answer.
#[allow(dead_code)]
#[derive(Debug, Clone, Copy)]
pub enum Reply {
    Found,
    NotFound,
    ServerError,
}

impl Reply {
    fn into_result(self, email: &str) -> Result<UserSubscription, AppError> {
        match self {
            Reply::Found => Ok(test_user(email)),
            Reply::NotFound => Err(AppError::NotFound(format!("user {}", email))),
            Reply::ServerError => Err(AppError::BackendApi(
                "HTTP 500 Internal Server Error: boom".to_string(),
            )),
        }
    }
}

/// A user record as the backend would return it.
pub fn test_user(email: &str) -> UserSubscription {
    UserSubscription {
        id: 1,
        email: email.to_string(),
        beag_client_id: None,
        subscription_status: Some("PAID".to_string()),
        plan_id: Some(3),
        start_date: None,
        end_date: None,
        my_saas_app_id: None,
        last_synced: None,
        created_at: "2025-01-01T00:00:00Z".to_string(),
        updated_at: None,
    }
}

/// In-process backend double that answers lookups from a script and counts
/// every call.
#[derive(Default)]
pub struct FakeUserApi {
    lookups: Mutex<VecDeque<Reply>>,
    create_reply: Mutex<Option<Reply>>,
    pub lookup_calls: AtomicUsize,
    pub created: Mutex<Vec<String>>,
    /// Instants of each lookup (tokio clock, so paused tests see virtual time).
    pub lookup_times: Mutex<Vec<tokio::time::Instant>>,
}

#[allow(dead_code)]
impl FakeUserApi {
    /// Lookups answer with `lookups` in order; create answers with `create`.
    pub fn new(lookups: &[Reply], create: Reply) -> Arc<Self> {
        Arc::new(Self {
            lookups: Mutex::new(lookups.iter().copied().collect()),
            create_reply: Mutex::new(Some(create)),
            ..Default::default()
        })
    }

    pub fn lookups(&self) -> usize {
        self.lookup_calls.load(Ordering::SeqCst)
    }

    pub fn creates(&self) -> Vec<String> {
        self.created.lock().unwrap().clone()
    }

    /// Total backend requests of any kind.
    pub fn requests(&self) -> usize {
        self.lookups() + self.creates().len()
    }
}

#[async_trait]
impl UserApi for FakeUserApi {
    async fn get_user_by_email(&self, email: &str) -> Result<UserSubscription, AppError> {
        self.lookup_calls.fetch_add(1, Ordering::SeqCst);
        self.lookup_times
            .lock()
            .unwrap()
            .push(tokio::time::Instant::now());
        let reply = self
            .lookups
            .lock()
            .unwrap()
            .pop_front()
            .expect("unexpected extra lookup");
        reply.into_result(email)
    }

    async fn create_user(&self, email: &str) -> Result<UserSubscription, AppError> {
        self.created.lock().unwrap().push(email.to_string());
        let reply = self
            .create_reply
            .lock()
            .unwrap()
            .take()
            .expect("unexpected extra create");
        reply.into_result(email)
    }

    async fn list_users(&self) -> Result<Vec<UserSubscription>, AppError> {
        Ok(vec![test_user("a@x.com")])
    }

    async fn check_subscription(&self, email: &str) -> Result<Value, AppError> {
        Ok(json!({ "email": email, "has_active_subscription": true }))
    }

    async fn cached_subscription(&self, email: &str) -> Result<Value, AppError> {
        Err(AppError::NotFound(format!("cached subscription {}", email)))
    }

    async fn sync_user_subscription(&self, user_id: i64) -> Result<Value, AppError> {
        Ok(json!({ "synced": user_id }))
    }

    async fn sync_all_subscriptions(&self) -> Result<Value, AppError> {
        Err(AppError::BackendApi("HTTP 503: unavailable".to_string()))
    }

    async fn setup_status(&self) -> Result<Value, AppError> {
        Ok(json!({
            "backend": { "configured": true },
            "database": { "connected": false },
            "overall_progress": 40
        }))
    }
}

/// Everything a route test needs to inspect after a request.
#[allow(dead_code)]
pub struct TestApp {
    pub router: axum::Router,
    pub state: Arc<AppState>,
    pub local: Arc<MemoryStore>,
    pub session: Arc<MemoryStore>,
}

/// Create a test app over in-memory stores and the given backend.
#[allow(dead_code)]
pub fn create_test_app(api: Arc<dyn UserApi>) -> TestApp {
    let local = Arc::new(MemoryStore::new());
    let session = Arc::new(MemoryStore::new());

    let state = Arc::new(AppState::new(
        Config::test_default(),
        local.clone(),
        session.clone(),
        api,
    ));

    TestApp {
        router: create_router(state.clone()),
        state,
        local,
        session,
    }
}
