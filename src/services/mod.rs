// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - business logic layer.

pub mod account;
pub mod backend;
pub mod provisioning;

pub use account::AccountService;
pub use backend::{BackendClient, UserApi};
pub use provisioning::{ProvisioningOutcome, ProvisioningReconciler};
