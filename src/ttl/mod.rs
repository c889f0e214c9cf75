//! Multi-field TTL input validation.

use crate::error::{AuthdeckError, Result};

pub const MIN_TTL_SECONDS: u64 = 1;
/// 30 days.
pub const MAX_TTL_SECONDS: u64 = 2_592_000;

/// Raw text of the four TTL entry fields, exactly as typed.
///
/// Conversion happens on submit via [`TtlParts::to_seconds`]; an invalid
/// duration is rejected here and never reaches the network layer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TtlParts {
    pub days: String,
    pub hours: String,
    pub minutes: String,
    pub seconds: String,
}

impl TtlParts {
    pub fn new(
        days: impl Into<String>,
        hours: impl Into<String>,
        minutes: impl Into<String>,
        seconds: impl Into<String>,
    ) -> Self {
        Self {
            days: days.into(),
            hours: hours.into(),
            minutes: minutes.into(),
            seconds: seconds.into(),
        }
    }

    /// Convert to whole seconds, bounded to `1 ..= 30 days`.
    ///
    /// Blank fields count as zero. A field that is not entirely ASCII
    /// digits fails with a field-named error; no silent coercion and no
    /// negatives. The sum is `days*86400 + hours*3600 + minutes*60 +
    /// seconds`.
    pub fn to_seconds(&self) -> Result<u64> {
        let days = parse_field("Days", &self.days)?;
        let hours = parse_field("Hours", &self.hours)?;
        let minutes = parse_field("Minutes", &self.minutes)?;
        let seconds = parse_field("Seconds", &self.seconds)?;

        // Widened so the sum cannot overflow before the range check.
        let total = u128::from(days) * 86_400
            + u128::from(hours) * 3_600
            + u128::from(minutes) * 60
            + u128::from(seconds);

        if total < u128::from(MIN_TTL_SECONDS) {
            return Err(AuthdeckError::validation("TTL must be at least 1 second"));
        }
        if total > u128::from(MAX_TTL_SECONDS) {
            return Err(over_limit());
        }
        Ok(total as u64)
    }
}

fn parse_field(name: &str, raw: &str) -> Result<u64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(0);
    }
    if !trimmed.chars().all(|c| c.is_ascii_digit()) {
        return Err(AuthdeckError::validation(format!(
            "{name} must be a non-negative integer"
        )));
    }
    // All-digit text can still overflow u64; such a value can only be past
    // the 30-day cap, so report it as out of range.
    trimmed.parse().map_err(|_| over_limit())
}

fn over_limit() -> AuthdeckError {
    AuthdeckError::validation("TTL must be at most 30 days")
}
