//! Date helpers
//!
//! All calendar parsing and boundary math happens here; the repository layer
//! only sees `NaiveDate` bounds and `i64` Unix millis.

use chrono::NaiveDate;

use super::{AppError, AppResult};

/// Build a calendar date from components, rejecting impossible dates
/// (e.g. February 30th).
pub fn date_of(year: i32, month: u32, day: u32) -> AppResult<NaiveDate> {
    NaiveDate::from_ymd_opt(year, month, day).ok_or_else(|| {
        AppError::validation(format!(
            "Invalid calendar date: {year:04}-{month:02}-{day:02}"
        ))
    })
}

/// Parse a date string (YYYY-MM-DD)
pub fn parse_date(date: &str) -> AppResult<NaiveDate> {
    NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .map_err(|_| AppError::validation(format!("Invalid date format: {date}")))
}

/// Calendar-month bounds: first day of the month and first day of the next
/// month. Callers use `>= start AND < end` semantics.
pub fn month_bounds(year: i32, month: u32) -> AppResult<(NaiveDate, NaiveDate)> {
    if !(1..=12).contains(&month) {
        return Err(AppError::validation(format!(
            "Month must be between 1 and 12, got {month}"
        )));
    }
    let start = NaiveDate::from_ymd_opt(year, month, 1)
        .ok_or_else(|| AppError::validation(format!("Invalid month: {year:04}-{month:02}")))?;
    let end = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)
    }
    .ok_or_else(|| AppError::validation(format!("Invalid month: {year:04}-{month:02}")))?;
    Ok((start, end))
}

/// Unix-millis range covering one UTC calendar day.
///
/// Returns `[start, end)`, end being the next day's midnight.
pub fn day_millis_range(date: NaiveDate) -> (i64, i64) {
    let start = date.and_hms_opt(0, 0, 0).unwrap().and_utc().timestamp_millis();
    let next = date.succ_opt().unwrap_or(date);
    let end = next.and_hms_opt(0, 0, 0).unwrap().and_utc().timestamp_millis();
    (start, end)
}

/// Parse a billing month token (`YYYY-MM`) into its components.
pub fn parse_month_key(key: &str) -> Option<(i32, u32)> {
    let (y, m) = key.split_once('-')?;
    if y.len() != 4 || m.len() != 2 {
        return None;
    }
    let year: i32 = y.parse().ok()?;
    let month: u32 = m.parse().ok()?;
    if !(1..=12).contains(&month) {
        return None;
    }
    Some((year, month))
}

/// Validate a billing month token, surfacing a caller-friendly error.
pub fn validate_month_key(key: &str) -> AppResult<()> {
    parse_month_key(key).map(|_| ()).ok_or_else(|| {
        AppError::validation(format!("Month must be in format YYYY-MM, got {key}"))
    })
}

/// English month name ("January" .. "December").
pub fn month_name(month: u32) -> &'static str {
    const NAMES: [&str; 12] = [
        "January",
        "February",
        "March",
        "April",
        "May",
        "June",
        "July",
        "August",
        "September",
        "October",
        "November",
        "December",
    ];
    match month {
        1..=12 => NAMES[(month - 1) as usize],
        _ => "",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_impossible_dates() {
        assert!(date_of(2024, 2, 30).is_err());
        assert!(date_of(2024, 13, 1).is_err());
        assert!(date_of(2024, 2, 29).is_ok()); // leap year
        assert!(date_of(2023, 2, 29).is_err());
    }

    #[test]
    fn month_bounds_cover_december() {
        let (start, end) = month_bounds(2024, 12).unwrap();
        assert_eq!(start, NaiveDate::from_ymd_opt(2024, 12, 1).unwrap());
        assert_eq!(end, NaiveDate::from_ymd_opt(2025, 1, 1).unwrap());
    }

    #[test]
    fn month_key_parsing() {
        assert_eq!(parse_month_key("2024-03"), Some((2024, 3)));
        assert_eq!(parse_month_key("2024-13"), None);
        assert_eq!(parse_month_key("2024-3"), None);
        assert_eq!(parse_month_key("garbage"), None);
    }

    #[test]
    fn day_range_is_half_open() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
        let (start, end) = day_millis_range(date);
        assert_eq!(end - start, 24 * 60 * 60 * 1000);
    }
}
