// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Data models for the application.

pub mod account;
pub mod plan;
pub mod setup;
pub mod subscription;
pub mod user;

pub use account::AccountSnapshot;
pub use plan::plan_name;
pub use setup::{setup_progress, SetupProgress, SetupStatus};
pub use subscription::SubscriptionStatus;
pub use user::{CreateUserRequest, UserSubscription};
