// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Shared helpers for date/time parsing and formatting.

use chrono::{DateTime, NaiveDateTime, SecondsFormat, Utc};

/// Format a UTC timestamp as RFC3339 using a `Z` suffix.
pub fn format_utc_rfc3339(date: DateTime<Utc>) -> String {
    date.to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// Parse a datetime sent by a browser client.
///
/// Accepts full RFC3339 (`2024-01-15T14:30:00Z`, offsets allowed) as well
/// as the `datetime-local` form without a timezone (`2024-01-15T14:30`),
/// which is interpreted as UTC.
pub fn parse_client_datetime(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    for fmt in ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, fmt) {
            return Some(naive.and_utc());
        }
    }
    // Bare dates become midnight UTC
    if let Ok(naive) = NaiveDateTime::parse_from_str(&format!("{raw}T00:00"), "%Y-%m-%dT%H:%M") {
        return Some(naive.and_utc());
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Timelike;

    #[test]
    fn test_parse_rfc3339_with_z() {
        let dt = parse_client_datetime("2024-01-15T14:30:00Z").unwrap();
        assert_eq!(dt.hour(), 14);
    }

    #[test]
    fn test_parse_datetime_local() {
        let dt = parse_client_datetime("2024-01-15T14:30").unwrap();
        assert_eq!(dt.hour(), 14);
        assert_eq!(dt.minute(), 30);
    }

    #[test]
    fn test_parse_bare_date() {
        let dt = parse_client_datetime("2024-01-15").unwrap();
        assert_eq!(dt.hour(), 0);
    }

    #[test]
    fn test_parse_garbage_is_none() {
        assert!(parse_client_datetime("not-a-date").is_none());
    }

    #[test]
    fn test_format_uses_z_suffix() {
        let dt = parse_client_datetime("2024-01-15T14:30:00Z").unwrap();
        assert_eq!(format_utc_rfc3339(dt), "2024-01-15T14:30:00Z");
    }
}
