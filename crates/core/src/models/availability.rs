use serde::{Deserialize, Serialize};

/// Response body of an availability check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvailabilityResponse {
    pub available: bool,
}

/// Body attached to every non-2xx response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub err: String,
}

impl ErrorBody {
    pub fn new(err: impl Into<String>) -> Self {
        Self { err: err.into() }
    }
}
