use chrono::{DateTime, Local, TimeZone, Utc};
use std::fmt::{Display, Write};

const FALLBACK_DATE_FORMAT: &str = "%Y-%m-%d";

/// Format `date` with a user-supplied `strftime` pattern.
///
/// Invalid patterns fall back to ISO dates instead of panicking.
pub fn format_date<Tz>(date: DateTime<Tz>, pattern: &str) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let mut out = String::new();
    if write!(out, "{}", date.format(pattern)).is_ok() {
        return out;
    }
    tracing::debug!("Invalid date format '{pattern}'; using {FALLBACK_DATE_FORMAT}");
    date.format(FALLBACK_DATE_FORMAT).to_string()
}

/// [`format_date`] on the user's calendar: label dates are shown in local time.
pub fn format_local_date(date: DateTime<Utc>, pattern: &str) -> String {
    format_date(date.with_timezone(&Local), pattern)
}

/// `"6.42 l/100km"` style value text.
pub fn format_value(value: f64, decimals: usize, unit: &str) -> String {
    if unit.is_empty() {
        format!("{value:.decimals$}")
    } else {
        format!("{value:.decimals$} {unit}")
    }
}
