use thiserror::Error;

/// Client-caused problems with a submitted time slot.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("request payload failed to marshal to TimeSlotJSON format: {0}")]
    MalformedPayload(String),

    #[error("request Start time could not be interpreted as an RFC3339 timestamp")]
    BadTimestamp,

    #[error("request Start time cannot be missing or in the past")]
    PastOrMissingStart,

    #[error("input Duration string could not be interpreted")]
    BadDuration,

    #[error("input Duration cannot be missing, zero or negative")]
    NonPositiveDuration,
}

#[derive(Error, Debug)]
pub enum SchedulerError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("some or all of requested time is already reserved")]
    Conflict,

    #[error("no matching time slot found")]
    NotFound,

    #[error("Store error: {0}")]
    Store(#[from] eyre::Report),
}

pub type SchedulerResult<T> = Result<T, SchedulerError>;
