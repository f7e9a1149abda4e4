//! # Availability Handlers
//!
//! Check, reserve and cancel time slots on `/availability`.
//!
//! Every handler reads the request body as a [`TimeSlotJson`], runs it
//! through the configured validator, and then calls the store. Each store
//! call, and the wait for the reservation lock, is bounded by the SLA held
//! in [`ApiState`]; overrunning it is treated as a store failure.

use std::{future::Future, sync::Arc, time::Duration};

use axum::{Json, body::Bytes, extract::State, http::StatusCode};
use scheduler_core::{
    errors::{SchedulerError, SchedulerResult, ValidationError},
    models::{
        availability::AvailabilityResponse,
        time_slot::{TimeSlot, TimeSlotJson},
    },
};
use tracing::info;

use crate::{ApiState, middleware::error_handling::AppError};

/// Decodes and validates the request body.
///
/// The body is decoded from raw bytes so that a missing or unexpected
/// `Content-Type` header does not change the outcome.
fn unmarshal_time_slot(state: &ApiState, body: &Bytes) -> Result<TimeSlot, AppError> {
    let raw: TimeSlotJson = serde_json::from_slice(body)
        .map_err(|err| SchedulerError::from(ValidationError::MalformedPayload(err.to_string())))?;
    let slot = state
        .validator
        .to_time_slot(&raw)
        .map_err(SchedulerError::from)?;
    Ok(slot)
}

/// Runs a store call, or the wait for the reservation lock, under the SLA.
///
/// Store failures and overruns both come back as [`SchedulerError::Store`]
/// with `action` as the outermost context; domain outcomes such as
/// [`SchedulerError::NotFound`] pass through untouched.
async fn within_sla<T>(
    sla: Duration,
    action: &'static str,
    call: impl Future<Output = SchedulerResult<T>>,
) -> SchedulerResult<T> {
    match tokio::time::timeout(sla, call).await {
        Ok(Err(SchedulerError::Store(report))) => Err(SchedulerError::Store(report.wrap_err(action))),
        Ok(result) => result,
        Err(elapsed) => Err(SchedulerError::Store(
            eyre::Report::new(elapsed)
                .wrap_err(format!("exceeded its {sla:?} deadline"))
                .wrap_err(action),
        )),
    }
}

/// Reports whether a slot is free.
///
/// # Endpoint
///
/// ```text
/// GET /availability
/// {"start": "2030-01-01T10:00:00Z", "duration": "1h"}
/// ```
///
/// Responds `200 {"available": bool}`; `400` when the body is invalid and
/// `500` when the store cannot answer in time.
#[axum::debug_handler]
pub async fn get_availability(
    State(state): State<Arc<ApiState>>,
    body: Bytes,
) -> Result<Json<AvailabilityResponse>, AppError> {
    let slot = unmarshal_time_slot(&state, &body)?;

    let overlapping = within_sla(
        state.sla,
        "failed to check time slot availability",
        state.store.overlaps(slot),
    )
    .await?;

    Ok(Json(AvailabilityResponse {
        available: !overlapping,
    }))
}

/// Reserves a slot if nothing overlaps it.
///
/// Responds `201` with an empty body, `409` when the slot overlaps an
/// existing reservation, `400` for invalid input and `500` on store failure.
/// The overlap check and the insert run under the reservation lock so two
/// concurrent requests cannot both claim overlapping time. Waiting for that
/// lock is bounded by the SLA as well.
#[axum::debug_handler]
pub async fn post_availability(
    State(state): State<Arc<ApiState>>,
    body: Bytes,
) -> Result<StatusCode, AppError> {
    let slot = unmarshal_time_slot(&state, &body)?;

    let _reservation = within_sla(state.sla, "failed to acquire reservation lock", async {
        Ok(state.reservations.lock().await)
    })
    .await?;

    let overlapping = within_sla(
        state.sla,
        "failed to check time slot availability",
        state.store.overlaps(slot),
    )
    .await?;
    if overlapping {
        return Err(AppError(SchedulerError::Conflict));
    }

    within_sla(state.sla, "failed to add time slot", state.store.add(slot)).await?;

    info!(start = %slot.start, duration = %slot.duration, "time slot reserved");
    Ok(StatusCode::CREATED)
}

/// Cancels the first reservation exactly matching the slot.
///
/// Responds `204` with an empty body, `404` when nothing matches, `400` for
/// invalid input and `500` on store failure.
#[axum::debug_handler]
pub async fn delete_availability(
    State(state): State<Arc<ApiState>>,
    body: Bytes,
) -> Result<StatusCode, AppError> {
    let slot = unmarshal_time_slot(&state, &body)?;

    within_sla(
        state.sla,
        "failed to delete matching time slot",
        state.store.delete(slot),
    )
    .await?;

    info!(start = %slot.start, duration = %slot.duration, "time slot cancelled");
    Ok(StatusCode::NO_CONTENT)
}
