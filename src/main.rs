use std::sync::Arc;

use color_eyre::eyre::Result;
use dotenv::dotenv;
use scheduler_api::{ApiState, config::ApiConfig};
use scheduler_core::validators::JsonValidator;
use scheduler_store::repositories::time_slot::LocalStorage;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize error handling
    color_eyre::install()?;

    // Load environment variables
    dotenv().ok();

    // Load configuration
    let config = ApiConfig::from_env()?;

    // Reservations live in memory for the lifetime of the process
    let state = Arc::new(ApiState::new(
        Arc::new(LocalStorage::new()),
        Arc::new(JsonValidator),
        config.sla(),
    ));

    // Start API server
    scheduler_api::start_server(config, state).await?;

    Ok(())
}
