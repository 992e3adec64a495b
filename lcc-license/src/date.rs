//! Date parameter normalization.

use crate::error::{LicenseError, LicenseResult};
use chrono::NaiveDate;

/// Accepted input formats, tried in order.
const INPUT_FORMATS: [&str; 3] = ["%Y-%m-%d", "%Y/%m/%d", "%Y%m%d"];

/// Format written into license files.
pub const OUTPUT_FORMAT: &str = "%Y-%m-%d";

/// Normalizes `YYYY-MM-DD`, `YYYY/MM/DD` or `YYYYMMDD` to `YYYY-MM-DD`.
///
/// # Errors
///
/// Returns [`LicenseError::InvalidDate`] for input shorter than 8 characters or
/// input that is not a valid calendar date in one of the accepted formats.
pub fn normalize_date(input: &str) -> LicenseResult<String> {
    let trimmed = input.trim();
    if trimmed.len() < 8 {
        return Err(LicenseError::InvalidDate(input.to_string()));
    }
    INPUT_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(trimmed, fmt).ok())
        .map(|date| date.format(OUTPUT_FORMAT).to_string())
        .ok_or_else(|| LicenseError::InvalidDate(input.to_string()))
}
