use chrono::{NaiveDate, NaiveDateTime};

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y/%m/%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d"];

/// Fast parse of `"YYYY-MM-DD HH:MM:SS"` (or `/`-separated) → millis
fn parse_fixed_width(s: &str) -> Option<NaiveDateTime> {
    let b = s.as_bytes();
    // minimal length + separators check
    if s.len() != 19
        || b[4] != b[7]
        || !matches!(b[4], b'-' | b'/')
        || b[10] != b' '
        || b[13] != b':'
        || b[16] != b':'
    {
        return None;
    }
    let digits = [0..4, 5..7, 8..10, 11..13, 14..16, 17..19];
    if !digits.iter().all(|r| b[r.clone()].iter().all(u8::is_ascii_digit)) {
        return None;
    }
    let year: i32 = s[0..4].parse().ok()?;
    let month: u32 = s[5..7].parse().ok()?;
    let day: u32 = s[8..10].parse().ok()?;
    let hour: u32 = s[11..13].parse().ok()?;
    let min: u32 = s[14..16].parse().ok()?;
    let sec: u32 = s[17..19].parse().ok()?;

    NaiveDate::from_ymd_opt(year, month, day)?.and_hms_opt(hour, min, sec)
}

/// Parse an order timestamp into a naive date-time.
///
/// Bare dates resolve to midnight. Anything else is `None`.
pub fn parse_order_datetime(s: &str) -> Option<NaiveDateTime> {
    let s = s.trim();
    if s.is_empty() || !s.is_ascii() {
        return None;
    }
    if let Some(dt) = parse_fixed_width(s) {
        return Some(dt);
    }
    DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
        .or_else(|| {
            DATE_FORMATS
                .iter()
                .find_map(|fmt| NaiveDate::parse_from_str(s, fmt).ok())
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })
}

/// Same as [`parse_order_datetime`], as epoch millis of the naive wall-clock time.
pub fn parse_order_timestamp_millis(s: &str) -> Option<i64> {
    parse_order_datetime(s).map(|dt| dt.and_utc().timestamp_millis())
}
