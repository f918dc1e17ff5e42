//! Input validation rules.

use chrono::{NaiveDate, NaiveTime, Utc};

use crate::error::{Result, ServiceError};

/// Maximum chat message length, in characters.
pub const MAX_MESSAGE_LEN: usize = 1000;

/// Largest page size a caller can request.
pub const MAX_PAGE_LIMIT: i64 = 100;

/// Earliest accepted birth date.
const MIN_BIRTH_DATE: &str = "1900-01-01";

/// Validate and normalize a chat message: trimmed, non-empty, bounded.
pub fn validate_message(content: &str) -> Result<String> {
    let trimmed = content.trim();
    if trimmed.is_empty() {
        return Err(ServiceError::validation("message cannot be empty"));
    }
    if trimmed.chars().count() > MAX_MESSAGE_LEN {
        return Err(ServiceError::validation(format!(
            "message exceeds {MAX_MESSAGE_LEN} characters"
        )));
    }
    Ok(trimmed.to_string())
}

/// Parse a birth date in `YYYY-MM-DD` form. Rejects dates in the future and
/// dates before 1900.
pub fn parse_birth_date(s: &str) -> Result<NaiveDate> {
    let date = NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
        .map_err(|_| ServiceError::validation("date of birth must be YYYY-MM-DD"))?;

    if date > Utc::now().date_naive() {
        return Err(ServiceError::validation("date of birth cannot be in the future"));
    }
    let floor = NaiveDate::parse_from_str(MIN_BIRTH_DATE, "%Y-%m-%d").unwrap();
    if date < floor {
        return Err(ServiceError::validation("date of birth cannot be before 1900"));
    }
    Ok(date)
}

/// Parse a birth time in 24-hour `HH:MM` form.
pub fn parse_birth_time(s: &str) -> Result<NaiveTime> {
    NaiveTime::parse_from_str(s.trim(), "%H:%M")
        .map_err(|_| ServiceError::validation("time of birth must be HH:MM"))
}

/// Normalize paging values. SQLite treats a negative LIMIT as unbounded, so
/// limits are forced into `1..=MAX_PAGE_LIMIT` and offsets to zero or more.
pub fn clamp_page(limit: i64, offset: i64) -> (i64, i64) {
    (limit.clamp(1, MAX_PAGE_LIMIT), offset.max(0))
}

/// A required free-text field: present and non-blank.
pub fn require_text(value: &str, field: &str) -> Result<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ServiceError::validation(format!("{field} is required")));
    }
    Ok(trimmed.to_string())
}
