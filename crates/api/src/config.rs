//! # API Configuration Module
//!
//! This module handles loading and managing configuration for the scheduler API
//! server. It retrieves configuration values from environment variables and
//! provides defaults where appropriate.
//!
//! ## Environment Variables
//!
//! The following environment variables are used:
//!
//! - `API_HOST`: The host address to bind the server to (default: "0.0.0.0")
//! - `API_PORT`: The port to listen on (default: 8080)
//! - `LOG_LEVEL`: Logging level (default: "info")
//! - `API_CORS_ORIGINS`: Comma-separated list of allowed CORS origins
//! - `API_SLA_MILLIS`: Time budget for a single store call (default: 500)
//! - `API_REQUEST_TIMEOUT_SECONDS`: Time budget for a whole request (default: 30)
//! - `API_SHUTDOWN_GRACE_SECONDS`: Drain window after SIGINT/SIGTERM (default: 1)

use eyre::{Result, WrapErr};
use std::{env, time::Duration};
use tracing::Level;

/// Configuration for the scheduler API server
///
/// # Example
///
/// ```no_run
/// use eyre::Result;
/// use scheduler_api::config::ApiConfig;
///
/// fn example() -> Result<()> {
///     let config = ApiConfig::from_env()?;
///     println!("Starting server on {}:{}", config.host, config.port);
///     Ok(())
/// }
/// ```
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Host address for the API server (e.g., "127.0.0.1", "0.0.0.0")
    pub host: String,

    /// Port for the API server to listen on
    pub port: u16,

    /// Log level for the application
    pub log_level: Level,

    /// CORS allowed origins (optional)
    pub cors_origins: Option<Vec<String>>,

    /// Deadline for each store call, in milliseconds
    pub sla_millis: u64,

    /// Request timeout in seconds
    pub request_timeout: u64,

    /// Seconds granted to in-flight requests once shutdown starts
    pub shutdown_grace: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            log_level: Level::INFO,
            cors_origins: None,
            sla_millis: 500,
            request_timeout: 30,
            shutdown_grace: 1,
        }
    }
}

impl ApiConfig {
    /// Creates a new ApiConfig from environment variables
    ///
    /// Unset variables fall back to [`ApiConfig::default`].
    ///
    /// # Errors
    ///
    /// This function will return an error if:
    /// - The API_PORT value cannot be parsed as a u16
    /// - API_SLA_MILLIS, API_REQUEST_TIMEOUT_SECONDS or API_SHUTDOWN_GRACE_SECONDS
    ///   is set but is not a positive integer
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();

        // Network settings
        let host = env::var("API_HOST").unwrap_or(defaults.host);
        let port = match env::var("API_PORT") {
            Ok(port) => port.parse().wrap_err("Invalid API_PORT value")?,
            Err(_) => defaults.port,
        };

        // Logging settings
        let log_level = parse_log_level(&env::var("LOG_LEVEL").unwrap_or_default());

        // CORS settings
        let cors_origins = env::var("API_CORS_ORIGINS")
            .ok()
            .map(|origins| parse_origins(&origins));

        // Performance settings
        let sla_millis = positive_var("API_SLA_MILLIS", defaults.sla_millis)?;
        let request_timeout =
            positive_var("API_REQUEST_TIMEOUT_SECONDS", defaults.request_timeout)?;
        let shutdown_grace = positive_var("API_SHUTDOWN_GRACE_SECONDS", defaults.shutdown_grace)?;

        Ok(Self {
            host,
            port,
            log_level,
            cors_origins,
            sla_millis,
            request_timeout,
            shutdown_grace,
        })
    }

    /// Returns the server address as a string (e.g., "127.0.0.1:8080")
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn sla(&self) -> Duration {
        Duration::from_millis(self.sla_millis)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout)
    }

    pub fn shutdown_grace(&self) -> Duration {
        Duration::from_secs(self.shutdown_grace)
    }
}

/// Maps a `LOG_LEVEL` value to a tracing level, defaulting to INFO.
pub fn parse_log_level(value: &str) -> Level {
    match value.trim().to_ascii_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    }
}

/// Parses a setting that must be a positive integer.
pub fn parse_positive(name: &str, value: &str) -> Result<u64> {
    value
        .trim()
        .parse::<u64>()
        .ok()
        .filter(|parsed| *parsed > 0)
        .ok_or_else(|| eyre::eyre!("Invalid {name} value: {value:?}"))
}

fn positive_var(name: &str, default: u64) -> Result<u64> {
    match env::var(name) {
        Ok(value) => parse_positive(name, &value),
        Err(_) => Ok(default),
    }
}

fn parse_origins(origins: &str) -> Vec<String> {
    origins
        .split(',')
        .map(str::trim)
        .filter(|origin| !origin.is_empty())
        .map(str::to_string)
        .collect()
}
