//! Timestamp utilities.

use chrono::{DateTime, SecondsFormat, Utc};

/// Represents a UTC timestamp.
pub type Timestamp = DateTime<Utc>;

/// Returns the current UTC time as an ISO 8601 string with millisecond
/// precision, e.g. `2026-10-14T09:05:03.120Z`.
///
/// # Examples
///
/// ```
/// use cwlive::utils::iso_timestamp;
///
/// let ts = iso_timestamp();
/// assert!(ts.contains('T'));
/// assert!(ts.ends_with('Z'));
/// ```
#[must_use]
pub fn iso_timestamp() -> String {
    format_iso8601(&Utc::now())
}

/// Returns the current UTC timestamp.
#[must_use]
pub fn now_utc() -> Timestamp {
    Utc::now()
}

/// Formats a timestamp as ISO 8601 with millisecond precision and a `Z` suffix.
#[must_use]
pub fn format_iso8601(dt: &Timestamp) -> String {
    dt.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Formats a timestamp for use inside a file name.
///
/// The ISO 8601 form is truncated to whole seconds and every `:` is
/// replaced by `-`, e.g. `2026-10-14T09-05-03`.
///
/// # Examples
///
/// ```
/// use chrono::{TimeZone, Utc};
/// use cwlive::utils::filesystem_safe_timestamp;
///
/// let ts = Utc.with_ymd_and_hms(2026, 10, 14, 9, 5, 3).unwrap();
/// assert_eq!(filesystem_safe_timestamp(&ts), "2026-10-14T09-05-03");
/// ```
#[must_use]
pub fn filesystem_safe_timestamp(dt: &Timestamp) -> String {
    let iso = format_iso8601(dt).replace(':', "-");
    match iso.split_once('.') {
        Some((whole_seconds, _)) => whole_seconds.to_string(),
        None => iso,
    }
}
