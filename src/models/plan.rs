// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Friendly names for billing plan IDs.

/// Known plan IDs and their display names.
const PLAN_NAMES: &[(&str, &str)] = &[
    ("1", "Basic Plan"),
    ("2", "Pro Plan"),
    ("3", "Premium Plan"),
    ("4", "Enterprise Plan"),
    ("5", "Starter Plan"),
    ("10", "Monthly Basic"),
    ("11", "Monthly Pro"),
    ("12", "Monthly Premium"),
    ("20", "Annual Basic"),
    ("21", "Annual Pro"),
    ("22", "Annual Premium"),
    ("100", "Trial Plan"),
    ("999", "Lifetime Plan"),
];

/// Display name for a plan ID; no plan means the free tier.
pub fn plan_name(plan_id: Option<&str>) -> String {
    match plan_id.filter(|id| !id.is_empty()) {
        None => "Free".to_string(),
        Some(id) => PLAN_NAMES
            .iter()
            .find(|(known, _)| *known == id)
            .map(|(_, name)| name.to_string())
            .unwrap_or_else(|| format!("Plan {}", id)),
    }
}
