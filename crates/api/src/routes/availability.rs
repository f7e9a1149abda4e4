use axum::{routing::get, Router};
use std::sync::Arc;

use crate::{handlers, ApiState};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new().route(
        "/availability",
        get(handlers::availability::get_availability)
            .post(handlers::availability::post_availability)
            .delete(handlers::availability::delete_availability),
    )
}
