//! Date parsing and Indonesian display formatting.
//!
//! The hosted tables carry dates as strings (plain dates for form input,
//! timestamps for server-written columns). Parsing is tolerant of the three
//! shapes that occur in practice; formatting mirrors the short and long
//! `id-ID` display forms the product has always shown ("5 Mar 2024" in
//! detail views, "5 Maret 2024" on the dashboard and report).

use chrono::{DateTime, NaiveDate, NaiveDateTime};

const MONTHS_SHORT: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "Mei", "Jun", "Jul", "Agu", "Sep", "Okt", "Nov", "Des",
];

const MONTHS_LONG: [&str; 12] = [
    "Januari",
    "Februari",
    "Maret",
    "April",
    "Mei",
    "Juni",
    "Juli",
    "Agustus",
    "September",
    "Oktober",
    "November",
    "Desember",
];

/// Parse a wire date: `YYYY-MM-DD`, a bare timestamp, or RFC 3339.
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    let trimmed = value.trim();
    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return Some(date);
    }
    if let Ok(datetime) = NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M:%S") {
        return Some(datetime.date());
    }
    if let Ok(datetime) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(datetime.date_naive());
    }
    None
}

/// Sort key for descending-date ordering; unparseable dates sort oldest.
pub fn date_key(value: &str) -> NaiveDate {
    parse_date(value).unwrap_or(NaiveDate::MIN)
}

fn format_with(months: &[&str; 12], value: &str) -> String {
    match parse_date(value) {
        Some(date) => {
            use chrono::Datelike;
            let month = months[date.month0() as usize];
            format!("{} {} {}", date.day(), month, date.year())
        }
        // Unparseable dates are shown as stored rather than dropped.
        None => value.to_string(),
    }
}

/// Short display form: "5 Mar 2024".
pub fn format_short(value: &str) -> String {
    format_with(&MONTHS_SHORT, value)
}

/// Long display form: "5 Maret 2024".
pub fn format_long(value: &str) -> String {
    format_with(&MONTHS_LONG, value)
}
