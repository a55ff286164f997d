//! Token decoders for listing rows.
//!
//! Turns the human-readable size and date columns of an autoindex line into numbers that can be
//! sorted on, and decodes HTML character references in display names.
//!
//! None of these functions fail: anything that can't be decoded collapses to a sentinel
//! ([UNKNOWN_SIZE] or [UNKNOWN_TIMESTAMP]) or is passed through untouched.

use chrono::{DateTime, NaiveDateTime};

use std::borrow::Cow;

/// Size sentinel for directories and sizes that could not be decoded.
pub const UNKNOWN_SIZE: i64 = -1;
/// Timestamp sentinel for dates that could not be decoded.
pub const UNKNOWN_TIMESTAMP: i64 = 0;

/// Date layouts emitted by common static servers, tried in order.
/// nginx: `18-Oct-2026 12:34`, apache: `2026-10-18 12:34`, lighttpd: `2026-Oct-18 12:34:56`
const DATE_FORMATS: &[&str] = &[
    "%d-%b-%Y %H:%M",
    "%d-%b-%Y %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%b-%d %H:%M:%S",
    "%Y-%b-%d %H:%M",
];

/// Decodes a magnitude string like `"1.2K"`, `"3.5M"` or `"512"` into bytes.
///
/// Suffixes are binary (K = 1024, M = 1024^2, ...), case-insensitive, and may be separated from
/// the number by whitespace. Fractional results are truncated toward zero, so `"1.2K"` is 1228.
///
/// # Returns
/// The byte count, or [UNKNOWN_SIZE] for `"-"`, empty input and anything unparseable.
pub fn parse_size_to_bytes(raw: &str) -> i64 {
    let raw = raw.trim();
    if raw.is_empty() || raw == "-" {
        return UNKNOWN_SIZE;
    }

    let split = raw
        .find(|c: char| !(c.is_ascii_digit() || c == '.'))
        .unwrap_or(raw.len());
    let (number, suffix) = raw.split_at(split);

    let multiplier: f64 = match suffix.trim_start() {
        "" => 1.0,
        "k" | "K" => 1024.0,
        "m" | "M" => 1024.0 * 1024.0,
        "g" | "G" => 1024.0 * 1024.0 * 1024.0,
        "t" | "T" => 1024.0 * 1024.0 * 1024.0 * 1024.0,
        _ => return UNKNOWN_SIZE,
    };

    match number.parse::<f64>() {
        Ok(n) if n.is_finite() && n >= 0.0 => (n * multiplier) as i64,
        _ => UNKNOWN_SIZE,
    }
}

/// Decodes a listing date token into epoch milliseconds.
///
/// Dates without an offset are taken as UTC; autoindex pages don't say which zone they use.
///
/// # Returns
/// Milliseconds since the epoch, or [UNKNOWN_TIMESTAMP] if no known layout matches.
pub fn parse_date_to_timestamp(raw: &str) -> i64 {
    let raw = raw.trim();
    if raw.is_empty() || raw == "-" {
        return UNKNOWN_TIMESTAMP;
    }

    for fmt in DATE_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, fmt) {
            return dt.and_utc().timestamp_millis();
        }
    }

    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.timestamp_millis())
        .unwrap_or(UNKNOWN_TIMESTAMP)
}

/// Decodes the HTML character references a server may put inside link text.
///
/// Handles the five named XML entities plus decimal and hex numeric references.
/// Unknown or malformed references are left as they are.
pub fn decode_entities(text: &str) -> Cow<'_, str> {
    if !text.contains('&') {
        return Cow::Borrowed(text);
    }

    let mut out = String::with_capacity(text.len());
    let mut rest = text;

    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        let tail = &rest[amp..];

        let decoded = tail
            .find(';')
            .filter(|&semi| semi <= 10)
            .and_then(|semi| decode_reference(&tail[1..semi]).map(|c| (c, semi)));

        match decoded {
            Some((c, semi)) => {
                out.push(c);
                rest = &tail[semi + 1..];
            }
            None => {
                out.push('&');
                rest = &tail[1..];
            }
        }
    }
    out.push_str(rest);
    Cow::Owned(out)
}

fn decode_reference(name: &str) -> Option<char> {
    match name {
        "amp" => Some('&'),
        "lt" => Some('<'),
        "gt" => Some('>'),
        "quot" => Some('"'),
        "apos" => Some('\''),
        _ => {
            let num = name.strip_prefix('#')?;
            let code = match num.strip_prefix(['x', 'X']) {
                Some(hex) => u32::from_str_radix(hex, 16).ok()?,
                None => num.parse::<u32>().ok()?,
            };
            char::from_u32(code)
        }
    }
}
