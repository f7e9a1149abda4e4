use chrono::{DateTime, Duration, Utc};

use crate::{
    duration::parse_duration,
    errors::ValidationError,
    models::time_slot::{TimeSlot, TimeSlotJson},
};

/// Turns untrusted wire input into a well-formed [`TimeSlot`].
pub trait Validator: Send + Sync {
    fn to_time_slot(&self, raw: &TimeSlotJson) -> Result<TimeSlot, ValidationError>;
}

/// Validates against the wall clock at the moment of the call.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonValidator;

impl Validator for JsonValidator {
    fn to_time_slot(&self, raw: &TimeSlotJson) -> Result<TimeSlot, ValidationError> {
        validate_at(raw, Utc::now())
    }
}

/// Checks `raw` as if the current time were `now`.
///
/// The checks run in order and the first failure is returned:
///
/// 1. `start` must be an RFC3339 timestamp with an upper-case `T` separator
///    and, when given, an upper-case `Z`.
/// 2. `start` must lie strictly after `now`.
/// 3. `duration` must be a duration expression (see [`crate::duration`]).
/// 4. `duration` must be positive, and `start + duration` representable.
pub fn validate_at(raw: &TimeSlotJson, now: DateTime<Utc>) -> Result<TimeSlot, ValidationError> {
    if !has_rfc3339_separators(&raw.start) {
        return Err(ValidationError::BadTimestamp);
    }
    let start = DateTime::parse_from_rfc3339(&raw.start)
        .map_err(|_| ValidationError::BadTimestamp)?;
    if start.with_timezone(&Utc) <= now {
        return Err(ValidationError::PastOrMissingStart);
    }

    let duration = parse_duration(&raw.duration).map_err(|_| ValidationError::BadDuration)?;
    if duration <= Duration::zero() {
        return Err(ValidationError::NonPositiveDuration);
    }
    start
        .checked_add_signed(duration)
        .ok_or(ValidationError::BadDuration)?;

    Ok(TimeSlot::new(start, duration))
}

// chrono also takes a space or lower-case `t`/`z`, which RFC3339 does not.
fn has_rfc3339_separators(start: &str) -> bool {
    start.as_bytes().get(10) == Some(&b'T') && !start.ends_with('z')
}
