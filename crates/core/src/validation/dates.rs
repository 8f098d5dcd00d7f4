//! Date parsing for form input.
//!
//! Accepted layouts: `YYYY-MM-DD`, `DD/MM/YYYY` and `DD-MM-YYYY`. The
//! layout is checked first, then the calendar date itself.

use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::Regex;

static ISO_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").expect("valid regex"));
static SLASH_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{2}/\d{2}/\d{4}$").expect("valid regex"));
static DASH_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{2}-\d{2}-\d{4}$").expect("valid regex"));

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateError {
    /// The text does not follow any accepted layout.
    Format,
    /// The layout is right but the date does not exist (e.g. 30 February).
    Calendar,
}

/// Parse a date in one of the accepted layouts.
pub fn parse_date(raw: &str) -> Result<NaiveDate, DateError> {
    let raw = raw.trim();
    let format = if ISO_RE.is_match(raw) {
        "%Y-%m-%d"
    } else if SLASH_RE.is_match(raw) {
        "%d/%m/%Y"
    } else if DASH_RE.is_match(raw) {
        "%d-%m-%Y"
    } else {
        return Err(DateError::Format);
    };
    NaiveDate::parse_from_str(raw, format).map_err(|_| DateError::Calendar)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn accepts_all_layouts() {
        assert_eq!(parse_date("2024-03-15"), Ok(ymd(2024, 3, 15)));
        assert_eq!(parse_date("15/03/2024"), Ok(ymd(2024, 3, 15)));
        assert_eq!(parse_date("15-03-2024"), Ok(ymd(2024, 3, 15)));
    }

    #[test]
    fn rejects_other_layouts() {
        assert_eq!(parse_date("2024/03/15"), Err(DateError::Format));
        assert_eq!(parse_date("15.03.2024"), Err(DateError::Format));
        assert_eq!(parse_date("5/3/2024"), Err(DateError::Format));
        assert_eq!(parse_date("ayer"), Err(DateError::Format));
    }

    #[test]
    fn rejects_impossible_dates() {
        assert_eq!(parse_date("2024-02-30"), Err(DateError::Calendar));
        assert_eq!(parse_date("31/04/2024"), Err(DateError::Calendar));
        assert_eq!(parse_date("2023-13-01"), Err(DateError::Calendar));
    }

    #[test]
    fn leap_day_is_valid_only_in_leap_years() {
        assert!(parse_date("29/02/2024").is_ok());
        assert_eq!(parse_date("29/02/2023"), Err(DateError::Calendar));
    }
}
