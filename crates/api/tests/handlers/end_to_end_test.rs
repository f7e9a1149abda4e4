use std::sync::Arc;

use axum::{body::Bytes, extract::State, http::StatusCode};
use chrono::{Duration, Utc};
use pretty_assertions::assert_eq;
use scheduler_api::handlers::availability::post_availability;
use scheduler_core::models::availability::{AvailabilityResponse, ErrorBody};
use serde_json::json;

use crate::test_utils::{body, local_server, local_state, rfc3339, tomorrow};

#[test_log::test(tokio::test)]
async fn test_reserve_lifecycle() {
    let server = local_server();
    let slot = body(tomorrow(), "1h30m0s");

    server.post("/availability").json(&slot).await.assert_status(StatusCode::CREATED);

    let response = server.post("/availability").json(&slot).await;
    response.assert_status(StatusCode::CONFLICT);
    assert_eq!(
        response.json::<ErrorBody>(),
        ErrorBody::new("some or all of requested time is already reserved")
    );

    let response = server.get("/availability").json(&slot).await;
    assert_eq!(
        response.json::<AvailabilityResponse>(),
        AvailabilityResponse { available: false }
    );

    server.delete("/availability").json(&slot).await.assert_status(StatusCode::NO_CONTENT);

    let response = server.delete("/availability").json(&slot).await;
    response.assert_status(StatusCode::NOT_FOUND);
    assert_eq!(
        response.json::<ErrorBody>(),
        ErrorBody::new("no matching time slot found")
    );

    let response = server.get("/availability").json(&slot).await;
    assert_eq!(
        response.json::<AvailabilityResponse>(),
        AvailabilityResponse { available: true }
    );
}

#[test_log::test(tokio::test)]
async fn test_touching_slots_can_both_be_reserved() {
    let server = local_server();
    let t = tomorrow();

    server
        .post("/availability")
        .json(&body(t, "1h"))
        .await
        .assert_status(StatusCode::CREATED);
    server
        .post("/availability")
        .json(&body(t + Duration::hours(1), "1h"))
        .await
        .assert_status(StatusCode::CREATED);
}

#[test_log::test(tokio::test)]
async fn test_shared_end_conflicts() {
    let server = local_server();
    let t = tomorrow();

    server
        .post("/availability")
        .json(&body(t, "2h"))
        .await
        .assert_status(StatusCode::CREATED);
    server
        .post("/availability")
        .json(&body(t + Duration::hours(1), "1h"))
        .await
        .assert_status(StatusCode::CONFLICT);
}

#[test_log::test(tokio::test)]
async fn test_cancel_requires_exact_match() {
    let server = local_server();
    let t = tomorrow();

    server
        .post("/availability")
        .json(&body(t, "1h"))
        .await
        .assert_status(StatusCode::CREATED);

    // Overlapping but not identical
    server
        .delete("/availability")
        .json(&body(t, "30m"))
        .await
        .assert_status(StatusCode::NOT_FOUND);

    // Same instant and length, written differently
    let same_instant = t
        .with_timezone(&chrono::FixedOffset::east_opt(2 * 3600).unwrap())
        .to_rfc3339();
    server
        .delete("/availability")
        .json(&json!({ "start": same_instant, "duration": "60m" }))
        .await
        .assert_status(StatusCode::NO_CONTENT);
}

#[test_log::test(tokio::test)]
async fn test_validation_errors_are_bad_requests() {
    let server = local_server();
    let one_second_ago = rfc3339(Utc::now() - Duration::seconds(1));

    let response = server
        .get("/availability")
        .json(&json!({ "start": one_second_ago, "duration": "garbage" }))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(
        response.json::<ErrorBody>(),
        ErrorBody::new("request Start time cannot be missing or in the past")
    );

    let response = server.post("/availability").json(&body(tomorrow(), "0s")).await;
    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(
        response.json::<ErrorBody>(),
        ErrorBody::new("input Duration cannot be missing, zero or negative")
    );

    let response = server
        .post("/availability")
        .json(&json!({ "duration": "1h" }))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(
        response.json::<ErrorBody>(),
        ErrorBody::new("request Start time could not be interpreted as an RFC3339 timestamp")
    );

    let response = server
        .post("/availability")
        .json(&json!({ "start": rfc3339(tomorrow()), "duration": "1 hour" }))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(
        response.json::<ErrorBody>(),
        ErrorBody::new("input Duration string could not be interpreted")
    );
}

#[test_log::test(tokio::test)]
async fn test_body_with_text_content_type() {
    let server = local_server();
    let raw = body(tomorrow(), "45m").to_string();

    server
        .post("/availability")
        .text(raw)
        .await
        .assert_status(StatusCode::CREATED);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_overlapping_reservations_admit_one() {
    let state = local_state();
    let t = tomorrow();

    let mut tasks = Vec::new();
    for offset in 0..8 {
        let state = Arc::clone(&state);
        let payload = body(t + Duration::minutes(offset), "1h").to_string();
        tasks.push(tokio::spawn(async move {
            post_availability(State(state), Bytes::from(payload)).await
        }));
    }

    let mut created = 0;
    let mut conflicts = 0;
    for task in tasks {
        match task.await.unwrap() {
            Ok(status) => {
                assert_eq!(status, StatusCode::CREATED);
                created += 1;
            }
            Err(err) => {
                assert_eq!(err.status(), StatusCode::CONFLICT);
                conflicts += 1;
            }
        }
    }

    assert_eq!(created, 1);
    assert_eq!(conflicts, 7);
}
