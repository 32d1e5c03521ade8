// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Key-value storage layer.
//!
//! The dashboard keeps two stores behind the same interface:
//! - a persistent "local" store holding the account keys written by the
//!   authentication widget ([`FileStore`] in production)
//! - a session store holding per-session provisioning markers
//!   ([`MemoryStore`], which lives as long as the process)

pub mod file;
pub mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

use crate::error::Result;

/// Minimal get/set/remove store, injected wherever storage is needed.
pub trait KeyValueStore: Send + Sync {
    /// Read a value; `Ok(None)` when the key is absent.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Insert or overwrite a value.
    fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Remove a key. Removing an absent key is not an error.
    fn remove(&self, key: &str) -> Result<()>;
}

/// Key names in the persistent local store, as written by the auth widget.
pub mod keys {
    pub const IDENTITY: &str = "x_email";
    pub const ACCESS_TOKEN: &str = "x_access_token";
    pub const PLAN_ID: &str = "x_plan_id";
    pub const START_DATE: &str = "x_start_date";
    pub const END_DATE: &str = "x_end_date";
    pub const STATUS: &str = "x_status";

    /// Every account key; logout clears exactly these.
    pub const ACCOUNT: [&str; 6] = [
        ACCESS_TOKEN,
        IDENTITY,
        PLAN_ID,
        START_DATE,
        END_DATE,
        STATUS,
    ];

    /// Prefix of the per-identity provisioning marker in the session store.
    pub const SESSION_MARKER_PREFIX: &str = "user_created_";

    /// Session marker key for one identity.
    pub fn session_marker(identity: &str) -> String {
        format!("{}{}", SESSION_MARKER_PREFIX, identity)
    }
}
