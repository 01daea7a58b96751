pub mod daily_logs;
pub mod dashboard;
pub mod health;
pub mod subjects;
pub mod users;

use chrono::NaiveDate;

use crate::error::{AppError, AppResult};

/// Parse an ISO calendar date from request input. Malformed input is the
/// caller's mistake and is reported as such, never silently corrected.
pub(crate) fn parse_date(raw: &str) -> AppResult<NaiveDate> {
    raw.parse::<NaiveDate>()
        .map_err(|_| AppError::InvalidDate(format!("'{}' is not a valid date (YYYY-MM-DD)", raw)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_date_accepts_iso() {
        assert_eq!(
            parse_date("2026-03-01").unwrap(),
            NaiveDate::from_ymd_opt(2026, 3, 1).unwrap()
        );
    }

    #[test]
    fn test_parse_date_rejects_garbage() {
        assert!(matches!(
            parse_date("not-a-date"),
            Err(AppError::InvalidDate(_))
        ));
    }

    #[test]
    fn test_parse_date_rejects_out_of_range_day() {
        assert!(matches!(
            parse_date("2026-02-30"),
            Err(AppError::InvalidDate(_))
        ));
    }
}
