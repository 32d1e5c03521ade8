// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Ensures a backend user record exists for the signed-in identity.
//!
//! Runs once per landing-page load:
//! 1. No identity, or the session marker is already set: do nothing
//! 2. Look the user up; found means done
//! 3. Not found: wait, giving the external subscription sync a chance to
//!    create the record first, then look again
//! 4. Still not found: create it (once; failures are not retried)
//! 5. Set the session marker regardless of outcome
//!
//! Errors other than "not found" never lead to a create call, so a flaky
//! backend cannot cause duplicate users. Nothing here is fatal.

use crate::models::UserSubscription;
use crate::services::backend::UserApi;
use crate::storage::{keys, KeyValueStore};
use std::sync::Arc;
use std::time::Duration;

const MARKER_SET: &str = "true";

/// What a reconciler run did. Informational only; callers always proceed.
#[derive(Debug, Clone, PartialEq)]
pub enum ProvisioningOutcome {
    /// No identity in the local store.
    NoIdentity,
    /// This session already made its attempt for the identity.
    AlreadyAttempted,
    /// The user already existed on the first lookup.
    Existing,
    /// The user appeared during the race delay.
    CreatedExternally,
    /// We created the user.
    Created(UserSubscription),
    /// Both lookups said not found and the create call failed.
    CreateFailed,
    /// A lookup failed for a reason other than "not found".
    LookupFailed,
}

/// Result of a single lookup, folded into the three cases the flow cares about.
enum Lookup {
    Found,
    Missing,
    Failed,
}

/// Idempotent, session-guarded user provisioning.
#[derive(Clone)]
pub struct ProvisioningReconciler {
    api: Arc<dyn UserApi>,
    session: Arc<dyn KeyValueStore>,
    race_delay: Duration,
}

impl ProvisioningReconciler {
    pub fn new(
        api: Arc<dyn UserApi>,
        session: Arc<dyn KeyValueStore>,
        race_delay: Duration,
    ) -> Self {
        Self {
            api,
            session,
            race_delay,
        }
    }

    /// Run the reconciliation for `identity`. Never fails.
    ///
    /// The identity is used exactly as stored for lookups and the marker key;
    /// a blank one counts as absent.
    pub async fn reconcile(&self, identity: Option<&str>) -> ProvisioningOutcome {
        let Some(email) = identity.filter(|e| !e.trim().is_empty()) else {
            return ProvisioningOutcome::NoIdentity;
        };

        let marker = keys::session_marker(email);
        match self.session.get(&marker) {
            Ok(Some(_)) => {
                tracing::debug!(email, "Provisioning already attempted this session");
                return ProvisioningOutcome::AlreadyAttempted;
            }
            Ok(None) => {}
            // An unreadable marker is treated as unset; at worst we re-check the backend.
            Err(e) => tracing::warn!(email, error = %e, "Failed to read session marker"),
        }

        let outcome = self.provision(email).await;

        if let Err(e) = self.session.set(&marker, MARKER_SET) {
            tracing::error!(email, error = %e, "Failed to write session marker");
        }

        outcome
    }

    async fn provision(&self, email: &str) -> ProvisioningOutcome {
        match self.lookup(email, "initial").await {
            Lookup::Found => {
                tracing::info!(email, "User exists in backend");
                return ProvisioningOutcome::Existing;
            }
            Lookup::Failed => return ProvisioningOutcome::LookupFailed,
            Lookup::Missing => {}
        }

        tokio::time::sleep(self.race_delay).await;

        match self.lookup(email, "recheck").await {
            Lookup::Found => {
                tracing::info!(email, "User was created by external sync");
                ProvisioningOutcome::CreatedExternally
            }
            Lookup::Failed => ProvisioningOutcome::LookupFailed,
            Lookup::Missing => match self.api.create_user(email).await {
                Ok(user) => {
                    tracing::info!(email, user_id = user.id, "User created in backend");
                    ProvisioningOutcome::Created(user)
                }
                Err(e) => {
                    tracing::error!(email, error = %e, "Failed to create user");
                    ProvisioningOutcome::CreateFailed
                }
            },
        }
    }

    async fn lookup(&self, email: &str, attempt: &'static str) -> Lookup {
        match self.api.get_user_by_email(email).await {
            Ok(_) => Lookup::Found,
            Err(e) if e.is_not_found() => Lookup::Missing,
            Err(e) => {
                tracing::warn!(email, attempt, error = %e, "User lookup failed");
                Lookup::Failed
            }
        }
    }
}
