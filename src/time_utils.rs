// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Shared helpers for timestamps on generated results.

use chrono::{DateTime, SecondsFormat, Utc};

/// Format a UTC timestamp as RFC3339 with a `Z` suffix and whole seconds.
pub fn format_utc_rfc3339(date: DateTime<Utc>) -> String {
    date.to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// Current time, formatted for a `generated_at` field.
pub fn now_utc_rfc3339() -> String {
    format_utc_rfc3339(Utc::now())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_uses_z_suffix() {
        let date = DateTime::parse_from_rfc3339("2026-03-01T08:30:15.250+00:00")
            .unwrap()
            .with_timezone(&Utc);
        assert_eq!(format_utc_rfc3339(date), "2026-03-01T08:30:15Z");
    }
}
