// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Account state mirrored from the persistent local store.

use super::SubscriptionStatus;

/// The six account keys read from the local store. Every field is optional
/// because the auth widget may not have written them (or logout cleared them).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AccountSnapshot {
    pub access_token: Option<String>,
    pub email: Option<String>,
    pub plan_id: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub status: Option<String>,
}

impl AccountSnapshot {
    /// Signed in means a non-empty email is present. The access token is
    /// shown when available but never required.
    pub fn is_authenticated(&self) -> bool {
        self.email.as_deref().is_some_and(|e| !e.is_empty())
    }

    pub fn subscription_status(&self) -> SubscriptionStatus {
        SubscriptionStatus::from_raw(self.status.as_deref())
    }
}
