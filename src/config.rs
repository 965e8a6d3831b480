use anyhow::{Context, Result};
use std::env;

const DEFAULT_SERVICE_PORT: &str = "8080";
const DEFAULT_SERVICE_HOST: &str = "0.0.0.0";

#[derive(Debug, Clone)]
pub struct Config {
    pub spanner_emulator_host: Option<String>,
    pub spanner_project: String,
    pub spanner_instance: String,
    pub spanner_database: String,
    pub service_port: u16,
    pub service_host: String,
}

impl Config {
    /// Load configuration from the process environment
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration from any key lookup (environment, map in tests)
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &str| {
            lookup(key).with_context(|| format!("{} environment variable is required", key))
        };

        let spanner_emulator_host = lookup("SPANNER_EMULATOR_HOST");
        let spanner_project = required("SPANNER_PROJECT")?;
        let spanner_instance = required("SPANNER_INSTANCE")?;
        let spanner_database = required("SPANNER_DATABASE")?;

        let service_port = lookup("SERVICE_PORT")
            .unwrap_or_else(|| DEFAULT_SERVICE_PORT.to_string())
            .parse::<u16>()
            .context("SERVICE_PORT must be a valid port number (0-65535)")?;

        let service_host =
            lookup("SERVICE_HOST").unwrap_or_else(|| DEFAULT_SERVICE_HOST.to_string());

        Ok(Config {
            spanner_emulator_host,
            spanner_project,
            spanner_instance,
            spanner_database,
            service_port,
            service_host,
        })
    }

    /// `host:port` the HTTP server binds to
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.service_host, self.service_port)
    }

    pub fn log_startup(&self) {
        tracing::info!("Configuration loaded:");
        tracing::info!(
            "  Spanner emulator: {}",
            self.spanner_emulator_host
                .as_deref()
                .unwrap_or("disabled (using production)")
        );
        tracing::info!("  Spanner project: {}", self.spanner_project);
        tracing::info!("  Spanner instance: {}", self.spanner_instance);
        tracing::info!("  Spanner database: {}", self.spanner_database);
        tracing::info!("  Service listening on: {}", self.bind_address());
    }
}
