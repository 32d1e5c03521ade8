// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Shared helpers for date/time formatting.

use chrono::{DateTime, NaiveDate};

/// Placeholder shown when a date is not set.
pub const MISSING_DATE: &str = "N/A";

/// Format a stored date for display as `YYYY-MM-DD`.
///
/// Accepts RFC3339 timestamps and plain dates. Anything else is shown as-is.
pub fn format_display_date(raw: Option<&str>) -> String {
    let Some(raw) = raw.map(str::trim).filter(|s| !s.is_empty()) else {
        return MISSING_DATE.to_string();
    };

    if let Ok(date) = DateTime::parse_from_rfc3339(raw) {
        return date.date_naive().format("%Y-%m-%d").to_string();
    }
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return date.format("%Y-%m-%d").to_string();
    }
    raw.to_string()
}
