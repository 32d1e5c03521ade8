// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Account state in the persistent local store: read, sign-in handoff, logout.

use crate::error::{AppError, Result};
use crate::models::AccountSnapshot;
use crate::storage::{keys, KeyValueStore};
use std::collections::HashMap;
use std::sync::Arc;
use validator::ValidateEmail;

/// Reads and writes the account keys the auth widget manages.
#[derive(Clone)]
pub struct AccountService {
    store: Arc<dyn KeyValueStore>,
}

impl AccountService {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// The signed-in identity, if any.
    pub fn identity(&self) -> Result<Option<String>> {
        self.store.get(keys::IDENTITY)
    }

    /// Read all six account keys.
    pub fn snapshot(&self) -> Result<AccountSnapshot> {
        Ok(AccountSnapshot {
            access_token: self.store.get(keys::ACCESS_TOKEN)?,
            email: self.store.get(keys::IDENTITY)?,
            plan_id: self.store.get(keys::PLAN_ID)?,
            start_date: self.store.get(keys::START_DATE)?,
            end_date: self.store.get(keys::END_DATE)?,
            status: self.store.get(keys::STATUS)?,
        })
    }

    /// Store the token data returned by the auth widget after sign-in.
    ///
    /// Every pair is written as-is, like the widget does with browser storage.
    /// The identity is validated before anything is written.
    pub fn store_token_data(&self, token_data: &HashMap<String, String>) -> Result<()> {
        if let Some(email) = token_data.get(keys::IDENTITY) {
            if !email.validate_email() {
                return Err(AppError::BadRequest(format!(
                    "{} is not a valid email",
                    keys::IDENTITY
                )));
            }
        }

        for (key, value) in token_data {
            self.store.set(key, value)?;
        }

        tracing::info!(keys = token_data.len(), "Stored sign-in token data");
        Ok(())
    }

    /// Clear every account key. Keys are removed one by one; a failure part
    /// way through leaves the remaining keys in place.
    pub fn logout(&self) -> Result<()> {
        for key in keys::ACCOUNT {
            self.store.remove(key)?;
        }
        tracing::info!("Account keys cleared");
        Ok(())
    }
}
