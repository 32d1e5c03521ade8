// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Subscription status as reported by the billing provider.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Known billing statuses. Unrecognized values are preserved verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum SubscriptionStatus {
    Paid,
    Failed,
    Cancelled,
    Refunded,
    Paused,
    Resumed,
    NoSubscription,
    Other(String),
}

impl SubscriptionStatus {
    /// Parse an optional raw status; a missing value means no subscription.
    pub fn from_raw(raw: Option<&str>) -> Self {
        raw.map(Self::from).unwrap_or(Self::NoSubscription)
    }

    /// Wire code, e.g. `"PAID"`.
    pub fn code(&self) -> &str {
        match self {
            Self::Paid => "PAID",
            Self::Failed => "FAILED",
            Self::Cancelled => "CANCELLED",
            Self::Refunded => "REFUNDED",
            Self::Paused => "PAUSED",
            Self::Resumed => "RESUMED",
            Self::NoSubscription => "NO_SUBSCRIPTION",
            Self::Other(s) => s,
        }
    }

    /// Human-readable label for the dashboard badge.
    pub fn label(&self) -> &str {
        match self {
            Self::Paid | Self::Resumed => "Active",
            Self::Failed => "Payment Failed",
            Self::Cancelled => "Cancelled",
            Self::Refunded => "Refunded",
            Self::Paused => "Paused",
            Self::NoSubscription => "No Subscription",
            Self::Other(s) => s,
        }
    }

    /// Whether the subscription currently grants access.
    pub fn is_active(&self) -> bool {
        matches!(self, Self::Paid | Self::Resumed)
    }
}

impl From<&str> for SubscriptionStatus {
    fn from(raw: &str) -> Self {
        match raw {
            "PAID" => Self::Paid,
            "FAILED" => Self::Failed,
            "CANCELLED" => Self::Cancelled,
            "REFUNDED" => Self::Refunded,
            "PAUSED" => Self::Paused,
            "RESUMED" => Self::Resumed,
            "NO_SUBSCRIPTION" => Self::NoSubscription,
            other => Self::Other(other.to_string()),
        }
    }
}

impl From<String> for SubscriptionStatus {
    fn from(raw: String) -> Self {
        Self::from(raw.as_str())
    }
}

impl From<SubscriptionStatus> for String {
    fn from(status: SubscriptionStatus) -> Self {
        status.code().to_string()
    }
}

impl fmt::Display for SubscriptionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}
