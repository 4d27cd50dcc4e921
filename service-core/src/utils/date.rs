use crate::error::AppError;
use chrono::NaiveDate;

/// Wire format for every calendar date the services accept.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parse a `YYYY-MM-DD` date, naming the offending field on failure.
pub fn parse_date(field: &str, value: &str) -> Result<NaiveDate, AppError> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT).map_err(|_| {
        AppError::BadRequest(anyhow::anyhow!(
            "Invalid date for '{}': expected YYYY-MM-DD, got '{}'",
            field,
            value
        ))
    })
}
