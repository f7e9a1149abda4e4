//! # Scheduler API
//!
//! The API crate provides the web server for the scheduling-availability
//! service. Clients check, reserve and cancel time slots on `/availability`.
//!
//! ## Architecture
//!
//! This crate follows a layered architecture:
//!
//! - **Routes**: Define API endpoints and URL structure
//! - **Handlers**: Validate input and orchestrate store calls
//! - **Middleware**: Map domain errors onto HTTP responses
//! - **Config**: Handle environment and application configuration
//!
//! The API uses Axum as the web framework. Storage and validation are reached
//! through the [`SlotStore`] and [`Validator`] traits so handlers can be
//! exercised against substitutes.

/// Configuration module for API settings
pub mod config;
/// Request handlers that implement business logic
pub mod handlers;
/// Middleware for error handling
pub mod middleware;
/// Route definitions and API endpoint structure
pub mod routes;

use std::{future::IntoFuture, sync::Arc, time::Duration};

use axum::{Router, http::HeaderValue};
use eyre::Result;
use scheduler_core::validators::Validator;
use scheduler_store::SlotStore;
use tokio::{net::TcpListener, sync::Mutex};
use tower_http::{cors::CorsLayer, timeout::TimeoutLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::FmtSubscriber;

/// Shared application state that is accessible to all request handlers
///
/// # Example
///
/// ```rust
/// use std::{sync::Arc, time::Duration};
/// use scheduler_api::ApiState;
/// use scheduler_core::validators::JsonValidator;
/// use scheduler_store::repositories::time_slot::LocalStorage;
///
/// let state = ApiState::new(
///     Arc::new(LocalStorage::new()),
///     Arc::new(JsonValidator),
///     Duration::from_millis(500),
/// );
/// let app = scheduler_api::router(Arc::new(state));
/// ```
pub struct ApiState {
    /// Reserved time slots
    pub store: Arc<dyn SlotStore>,

    /// Turns request bodies into time slots
    pub validator: Arc<dyn Validator>,

    /// Deadline applied to each store call
    pub sla: Duration,

    /// Held across the overlap check and insert of a reservation
    pub reservations: Mutex<()>,
}

impl ApiState {
    pub fn new(store: Arc<dyn SlotStore>, validator: Arc<dyn Validator>, sla: Duration) -> Self {
        Self {
            store,
            validator,
            sla,
            reservations: Mutex::new(()),
        }
    }
}

/// Builds the application router with all routes and request tracing
pub fn router(state: Arc<ApiState>) -> Router {
    Router::new()
        // Health check endpoints
        .merge(routes::health::routes())
        // Availability management endpoints
        .merge(routes::availability::routes())
        // Attach shared state to all routes
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}

/// Starts the API server with the provided configuration and state
///
/// This function sets up logging, configures routes and middleware, and
/// serves until SIGINT or SIGTERM. In-flight requests then get
/// `config.shutdown_grace` to finish before the server stops waiting.
pub async fn start_server(config: config::ApiConfig, state: Arc<ApiState>) -> Result<()> {
    // Initialize tracing for logging
    let subscriber = FmtSubscriber::builder()
        .with_max_level(config.log_level)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let app = router(state);

    // Apply CORS configuration if origins are specified
    let app = if let Some(origins) = &config.cors_origins {
        let origins: Vec<HeaderValue> = origins
            .iter()
            .filter_map(|origin| match origin.parse::<HeaderValue>() {
                Ok(value) => Some(value),
                Err(_) => {
                    warn!("ignoring invalid CORS origin {origin:?}");
                    None
                }
            })
            .collect();

        let cors = CorsLayer::new()
            .allow_methods([
                axum::http::Method::GET,
                axum::http::Method::POST,
                axum::http::Method::DELETE,
                axum::http::Method::OPTIONS,
            ])
            .allow_headers([axum::http::header::CONTENT_TYPE, axum::http::header::ACCEPT])
            .allow_origin(origins);

        app.layer(cors)
    } else {
        app
    };

    // Add request timeout middleware
    let app = app.layer(
        tower::ServiceBuilder::new()
            .layer(TimeoutLayer::new(config.request_timeout()))
            .into_inner(),
    );

    // Start the HTTP server
    let addr = config.server_addr();
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on http://{}", addr);

    let shutdown = Arc::new(tokio::sync::Notify::new());
    let trigger = Arc::clone(&shutdown);
    let server = axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            shutdown_signal().await;
            info!("shutting down gracefully");
            trigger.notify_one();
        })
        .into_future();

    let grace = config.shutdown_grace();
    tokio::select! {
        result = server => result?,
        _ = async {
            shutdown.notified().await;
            tokio::time::sleep(grace).await;
        } => warn!("server forced to shut down after {grace:?}"),
    }

    info!("server exiting");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            warn!("failed to listen for Ctrl+C: {err}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                warn!("failed to listen for SIGTERM: {err}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
