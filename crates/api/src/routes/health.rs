use axum::{Json, Router, routing::get};
use serde::Serialize;
use std::sync::Arc;

use crate::ApiState;

#[derive(Debug, Serialize)]
struct ProbeResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    status: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    version: Option<&'static str>,
}

// Liveness only; the in-memory store has nothing to probe.
async fn health() -> Json<ProbeResponse> {
    Json(ProbeResponse {
        status: Some("ok"),
        version: None,
    })
}

async fn version() -> Json<ProbeResponse> {
    Json(ProbeResponse {
        status: None,
        version: Some(env!("CARGO_PKG_VERSION")),
    })
}

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route("/health", get(health))
        .route("/version", get(version))
}
