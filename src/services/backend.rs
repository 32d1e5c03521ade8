// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Backend user/subscription API client.
//!
//! Handles:
//! - User lookup by email (404 maps to [`AppError::NotFound`])
//! - User creation from a bare identity
//! - Subscription check/sync passthroughs for the dashboard

use crate::error::AppError;
use crate::models::{CreateUserRequest, UserSubscription};
use anyhow::Context;
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::time::Duration;

/// Operations the dashboard consumes from the backend.
///
/// A "not found" user must be reported as [`AppError::NotFound`]; every other
/// failure as some other variant. The provisioning reconciler depends on
/// that distinction.
#[async_trait]
pub trait UserApi: Send + Sync {
    async fn get_user_by_email(&self, email: &str) -> Result<UserSubscription, AppError>;

    async fn create_user(&self, email: &str) -> Result<UserSubscription, AppError>;

    async fn list_users(&self) -> Result<Vec<UserSubscription>, AppError>;

    async fn check_subscription(&self, email: &str) -> Result<Value, AppError>;

    async fn cached_subscription(&self, email: &str) -> Result<Value, AppError>;

    async fn sync_user_subscription(&self, user_id: i64) -> Result<Value, AppError>;

    async fn sync_all_subscriptions(&self) -> Result<Value, AppError>;

    async fn setup_status(&self) -> Result<Value, AppError>;
}

/// reqwest-based client for the backend API.
#[derive(Clone)]
pub struct BackendClient {
    http: reqwest::Client,
    base_url: String,
}

impl BackendClient {
    /// Create a client for the backend at `base_url` (no trailing slash needed).
    ///
    /// Every request is bounded by `timeout`; a backend that stops answering
    /// surfaces as [`AppError::BackendApi`] instead of stalling the caller.
    pub fn new(base_url: &str, timeout: Duration) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("failed building backend HTTP client")?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Generic GET request with JSON response.
    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, AppError> {
        let response = self
            .http
            .get(self.url(path))
            .send()
            .await
            .map_err(|e| AppError::BackendApi(e.to_string()))?;

        check_response_json(response).await
    }

    /// Generic POST request with an optional JSON body and JSON response.
    async fn post_json<T: DeserializeOwned>(
        &self,
        path: &str,
        body: Option<&Value>,
    ) -> Result<T, AppError> {
        let mut request = self.http.post(self.url(path));
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request
            .send()
            .await
            .map_err(|e| AppError::BackendApi(e.to_string()))?;

        check_response_json(response).await
    }
}

#[async_trait]
impl UserApi for BackendClient {
    async fn get_user_by_email(&self, email: &str) -> Result<UserSubscription, AppError> {
        let path = format!("/api/users/by-email/{}", urlencoding::encode(email));
        self.get_json(&path).await
    }

    async fn create_user(&self, email: &str) -> Result<UserSubscription, AppError> {
        let body = serde_json::to_value(CreateUserRequest {
            email: email.to_string(),
        })
        .map_err(|e| AppError::Internal(e.into()))?;

        self.post_json("/api/users/", Some(&body)).await
    }

    async fn list_users(&self) -> Result<Vec<UserSubscription>, AppError> {
        self.get_json("/api/users/").await
    }

    async fn check_subscription(&self, email: &str) -> Result<Value, AppError> {
        let path = format!("/api/subscriptions/check/{}", urlencoding::encode(email));
        self.get_json(&path).await
    }

    async fn cached_subscription(&self, email: &str) -> Result<Value, AppError> {
        let path = format!("/api/subscriptions/cached/{}", urlencoding::encode(email));
        self.get_json(&path).await
    }

    async fn sync_user_subscription(&self, user_id: i64) -> Result<Value, AppError> {
        self.post_json(&format!("/api/users/sync/{}", user_id), None)
            .await
    }

    async fn sync_all_subscriptions(&self) -> Result<Value, AppError> {
        self.post_json("/api/subscriptions/sync-all", None).await
    }

    async fn setup_status(&self) -> Result<Value, AppError> {
        self.get_json("/api/health/setup-status").await
    }
}

/// Check response status and parse the JSON body.
async fn check_response_json<T: DeserializeOwned>(
    response: reqwest::Response,
) -> Result<T, AppError> {
    if !response.status().is_success() {
        let status = response.status();

        // Backend paths stay internal; proxied 404s echo this message.
        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(AppError::NotFound("record not found".to_string()));
        }

        let body = response.text().await.unwrap_or_default();

        return Err(AppError::BackendApi(format!("HTTP {}: {}", status, body)));
    }

    response
        .json()
        .await
        .map_err(|e| AppError::BackendApi(format!("JSON parse error: {}", e)))
}
