//! # Error Handling Middleware
//!
//! Maps [`SchedulerError`] values onto HTTP status codes and `{"err": ...}`
//! bodies, and decides what reaches the logs.
//!
//! Input errors and domain conflicts are expected outcomes: the client gets
//! the full message and nothing above `debug` is logged. Store failures are
//! unexpected: the client only sees the outermost context of the report
//! (for example "failed to add time slot") while the whole chain is logged
//! at `error`.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use scheduler_core::{errors::SchedulerError, models::availability::ErrorBody};
use tracing::{debug, error};

/// Application error wrapper that provides HTTP status code mapping
///
/// # Example
///
/// ```
/// use scheduler_api::middleware::error_handling::AppError;
/// use scheduler_core::errors::{SchedulerError, ValidationError};
///
/// fn handler() -> Result<(), AppError> {
///     Err(SchedulerError::from(ValidationError::BadDuration))?
/// }
/// # assert!(handler().is_err());
/// ```
#[derive(Debug)]
pub struct AppError(pub SchedulerError);

impl AppError {
    pub fn status(&self) -> StatusCode {
        match &self.0 {
            SchedulerError::Validation(_) => StatusCode::BAD_REQUEST,
            SchedulerError::Conflict => StatusCode::CONFLICT,
            SchedulerError::NotFound => StatusCode::NOT_FOUND,
            SchedulerError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        let message = match &self.0 {
            SchedulerError::Store(report) => {
                error!(status = status.as_u16(), "store failure: {report:?}");
                report.to_string()
            }
            other => {
                debug!(status = status.as_u16(), "request rejected: {other}");
                other.to_string()
            }
        };

        (status, Json(ErrorBody::new(message))).into_response()
    }
}

impl From<SchedulerError> for AppError {
    fn from(err: SchedulerError) -> Self {
        AppError(err)
    }
}

/// Maps a SchedulerError to an HTTP response
pub fn map_error(err: SchedulerError) -> Response {
    AppError(err).into_response()
}
