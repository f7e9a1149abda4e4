use axum::http::StatusCode;
use rstest::rstest;
use scheduler_api::middleware::error_handling::{map_error, AppError};
use scheduler_core::errors::{SchedulerError, ValidationError};

#[rstest]
#[case::malformed(ValidationError::MalformedPayload("EOF".to_string()))]
#[case::timestamp(ValidationError::BadTimestamp)]
#[case::past(ValidationError::PastOrMissingStart)]
#[case::duration(ValidationError::BadDuration)]
#[case::non_positive(ValidationError::NonPositiveDuration)]
fn test_error_handling_validation(#[case] error: ValidationError) {
    let response = map_error(SchedulerError::Validation(error));

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_error_handling_conflict() {
    let response = map_error(SchedulerError::Conflict);

    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_error_handling_not_found() {
    let response = map_error(SchedulerError::NotFound);

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_error_handling_store_hides_detail() {
    let report = eyre::eyre!("mutex poisoned by thread 7").wrap_err("failed to add time slot");
    let response = map_error(SchedulerError::Store(report));

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body, serde_json::json!({ "err": "failed to add time slot" }));
}

#[test]
fn test_app_error_from_scheduler_error() {
    let error: AppError = SchedulerError::NotFound.into();

    assert_eq!(error.status(), StatusCode::NOT_FOUND);
}
