//! Date and month helpers.
//!
//! The frontend and the historical API speak zero-based months
//! (January = 0); everything internal — calendar math, the reports and
//! alerts tables — is one-based. The conversion happens here and
//! nowhere else.

use chrono::{Datelike, NaiveDate};

use super::{AppError, AppResult};

/// Zero-based external month → one-based internal month.
pub fn month_from_external(month0: i64) -> AppResult<u32> {
    if !(0..=11).contains(&month0) {
        return Err(AppError::validation(format!(
            "Month out of range (expected 0-11): {month0}"
        )));
    }
    Ok(month0 as u32 + 1)
}

/// One-based internal month → zero-based external month.
pub fn month_to_external(month1: u32) -> i64 {
    month1 as i64 - 1
}

/// Parse a `YYYY-MM-DD` date string.
pub fn parse_date(date: &str) -> AppResult<NaiveDate> {
    NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .map_err(|_| AppError::validation(format!("Invalid date format: {date}")))
}

/// `(year, one-based month)` of a `YYYY-MM-DD` date string.
pub fn year_month_of(date: &str) -> AppResult<(i32, u32)> {
    let parsed = parse_date(date)?;
    Ok((parsed.year(), parsed.month()))
}

/// SQL LIKE pattern matching every date in a month (`YYYY-MM-%`).
pub fn month_pattern(year: i32, month1: u32) -> String {
    format!("{year:04}-{month1:02}-%")
}

/// Optional date fields normalize absent or empty-string input to None;
/// anything else must parse.
pub fn normalize_optional_date(value: Option<String>) -> AppResult<Option<String>> {
    match value {
        None => Ok(None),
        Some(s) if s.is_empty() => Ok(None),
        Some(s) => {
            parse_date(&s)?;
            Ok(Some(s))
        }
    }
}

/// Spanish month name for alert payloads (one-based month).
pub fn month_name_es(month1: u32) -> &'static str {
    const NAMES: [&str; 12] = [
        "Enero",
        "Febrero",
        "Marzo",
        "Abril",
        "Mayo",
        "Junio",
        "Julio",
        "Agosto",
        "Septiembre",
        "Octubre",
        "Noviembre",
        "Diciembre",
    ];
    month1
        .checked_sub(1)
        .and_then(|i| NAMES.get(i as usize))
        .copied()
        .unwrap_or("Desconocido")
}
