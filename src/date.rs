//! Normalization of heterogeneous date representations into calendar dates.
//!
//! The upstream services hand this engine dates in whatever shape the legacy
//! backend stored them: bare `YYYY-MM-DD` strings, full ISO timestamps with
//! or without an offset, and locale-formatted `dd/mm/yyyy` triples. All
//! comparisons downstream are performed on `chrono::NaiveDate`, so the only
//! job here is to extract the year/month/day fields *as written* and refuse
//! anything that does not form a valid calendar date.

use chrono::{DateTime, NaiveDate, NaiveDateTime};

/// Parses a raw date string into a calendar date.
///
/// Accepted shapes, tried in order:
/// - `YYYY-MM-DD`, optionally followed by `T` or a space and any time-of-day
///   suffix (fractional seconds and `Z`/`±hh:mm` offsets included). The
///   offset is ignored rather than converted: a record stored as
///   `2024-06-15T00:00:00.000Z` is day 2024-06-15 in every process time
///   zone, never the day before or after.
/// - RFC 2822 timestamps; the date is taken in the timestamp's own offset.
/// - Slash- or dash-delimited numeric triples. A four-digit leading field is
///   read as `yyyy-mm-dd`, otherwise `dd/mm/yyyy`.
///
/// Returns `None` on empty input or when no shape yields a valid date.
/// Never panics; bad data is expected here, not exceptional.
pub fn normalize(raw: &str) -> Option<NaiveDate> {
    let s = raw.trim();
    if s.is_empty() {
        return None;
    }

    if let Some(date) = parse_iso_prefix(s) {
        return Some(date);
    }

    if let Ok(ts) = DateTime::parse_from_rfc2822(s) {
        return Some(ts.date_naive());
    }

    parse_delimited_triple(s)
}

/// Calendar date of an already-parsed timestamp. The value is copied, never
/// mutated.
pub fn normalize_datetime(ts: &NaiveDateTime) -> NaiveDate {
    ts.date()
}

/// `YYYY-MM-DD` head of an ISO-shaped string. Anything after position 10
/// must be a `T` or space separator introducing a time-of-day; the date
/// fields themselves are validated by chrono.
fn parse_iso_prefix(s: &str) -> Option<NaiveDate> {
    let bytes = s.as_bytes();
    if bytes.len() < 10 || bytes[4] != b'-' || bytes[7] != b'-' {
        return None;
    }
    if bytes.len() > 10 && bytes[10] != b'T' && bytes[10] != b' ' {
        return None;
    }
    // get() rather than indexing: multibyte input must not panic here
    let head = s.get(..10)?;
    NaiveDate::parse_from_str(head, "%Y-%m-%d").ok()
}

fn parse_delimited_triple(s: &str) -> Option<NaiveDate> {
    let parts: Vec<&str> = s.split(['/', '-']).collect();
    if parts.len() != 3 {
        return None;
    }

    let fields: Vec<u32> = parts
        .iter()
        .map(|p| p.trim().parse::<u32>().ok())
        .collect::<Option<Vec<_>>>()?;

    let (year, month, day) = if parts[0].trim().len() == 4 {
        (fields[0] as i32, fields[1], fields[2])
    } else {
        (fields[2] as i32, fields[1], fields[0])
    };

    NaiveDate::from_ymd_opt(year, month, day)
}
