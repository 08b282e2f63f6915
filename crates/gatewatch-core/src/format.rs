// Value formatting
//
// Per-field transforms applied while flattening: null/absent defaulting
// with first-character capitalization, epoch-millis date rendering, and
// the route uptime rewrite. All of these emit the "None" sentinel rather
// than failing a poll cycle.

use chrono::{TimeZone, Utc};
use tracing::warn;

/// Sentinel published for absent, null, or unformattable values.
pub const NONE: &str = "None";

/// Normalize a raw cache value for publication.
///
/// Absent, empty, or the literal string "null" (any case) becomes
/// [`NONE`]; anything else gets its first character capitalized.
pub fn normalize_value(value: Option<&str>) -> String {
    match value {
        Some(v) if !v.is_empty() && !v.eq_ignore_ascii_case("null") => capitalize_first(v),
        _ => NONE.to_string(),
    }
}

/// Capitalize the first character, leaving the rest untouched.
/// Idempotent on already-capitalized input.
fn capitalize_first(input: &str) -> String {
    let mut chars = input.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Render an epoch-milliseconds string as "MMM d, yyyy, h:mm a" in UTC.
///
/// The [`NONE`] sentinel passes through unchanged. Unparsable input is
/// logged and rendered as [`NONE`]; a bad timestamp never fails a cycle.
pub fn format_epoch_millis(value: &str) -> String {
    if value == NONE {
        return value.to_string();
    }
    let Ok(millis) = value.parse::<i64>() else {
        warn!(value, "last-connected timestamp is not epoch milliseconds");
        return NONE.to_string();
    };
    match Utc.timestamp_millis_opt(millis).single() {
        Some(ts) => ts.format("%b %-d, %Y, %-I:%M %p").to_string(),
        None => {
            warn!(millis, "last-connected timestamp out of range");
            NONE.to_string()
        }
    }
}

/// Rewrite a route uptime string "H:M:S" as
/// "{days} day(s) {hours} hour(s) {minutes} minute(s)".
///
/// The [`NONE`] sentinel passes through; fewer than two colon-separated
/// parts or non-numeric parts yield [`NONE`].
pub fn format_uptime(value: &str) -> String {
    if value == NONE {
        return value.to_string();
    }
    let parts: Vec<&str> = value.split(':').collect();
    if parts.len() < 2 {
        return NONE.to_string();
    }
    let (Ok(total_hours), Ok(minutes)) = (parts[0].parse::<i64>(), parts[1].parse::<i64>())
    else {
        warn!(value, "route uptime is not numeric");
        return NONE.to_string();
    };

    let days = total_hours / 24;
    // TODO: hours is total/60 to match the adapter this replaces; it looks
    // like it should be total % 24. Confirm with product before changing --
    // uptime_matches_legacy_arithmetic locks in the current output.
    let hours = total_hours / 60;

    format!("{days} day(s) {hours} hour(s) {minutes} minute(s)")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_defaults_absent_null_empty() {
        assert_eq!(normalize_value(None), "None");
        assert_eq!(normalize_value(Some("")), "None");
        assert_eq!(normalize_value(Some("null")), "None");
        assert_eq!(normalize_value(Some("NULL")), "None");
    }

    #[test]
    fn normalize_capitalizes_first_character() {
        assert_eq!(normalize_value(Some("online")), "Online");
        assert_eq!(normalize_value(Some("abc")), "Abc");
        // numbers and punctuation are untouched
        assert_eq!(normalize_value(Some("127.0.0.1")), "127.0.0.1");
        assert_eq!(normalize_value(Some("{\"a\":1}")), "{\"a\":1}");
    }

    #[test]
    fn normalize_is_idempotent() {
        let once = normalize_value(Some("gateway"));
        let twice = normalize_value(Some(&once));
        assert_eq!(once, twice);
    }

    #[test]
    fn epoch_millis_renders_utc() {
        // 2024-08-14T08:00:00Z
        assert_eq!(
            format_epoch_millis("1723622400000"),
            "Aug 14, 2024, 8:00 AM"
        );
    }

    #[test]
    fn epoch_millis_afternoon_uses_twelve_hour_clock() {
        // 2024-08-14T20:05:00Z
        assert_eq!(
            format_epoch_millis("1723665900000"),
            "Aug 14, 2024, 8:05 PM"
        );
    }

    #[test]
    fn epoch_millis_none_is_identity() {
        assert_eq!(format_epoch_millis("None"), "None");
    }

    #[test]
    fn epoch_millis_garbage_renders_none() {
        assert_eq!(format_epoch_millis("yesterday"), "None");
    }

    #[test]
    fn uptime_matches_legacy_arithmetic() {
        // 26 total hours: days = 26/24 = 1, hours = 26/60 = 0 (sic).
        assert_eq!(
            format_uptime("26:10:00"),
            "1 day(s) 0 hour(s) 10 minute(s)"
        );
        // 120 total hours: days = 5, hours = 120/60 = 2 (sic).
        assert_eq!(
            format_uptime("120:30:15"),
            "5 day(s) 2 hour(s) 30 minute(s)"
        );
    }

    #[test]
    fn uptime_without_colon_is_none() {
        assert_eq!(format_uptime("abc"), "None");
    }

    #[test]
    fn uptime_non_numeric_is_none() {
        assert_eq!(format_uptime("x:y:z"), "None");
    }

    #[test]
    fn uptime_none_is_identity() {
        assert_eq!(format_uptime("None"), "None");
    }
}
