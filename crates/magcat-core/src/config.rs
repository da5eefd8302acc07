use std::path::PathBuf;

use thiserror::Error;

/// Configuration for a catalog collection run.
///
/// Every knob has a compiled-in default, so an empty environment produces a
/// fully working configuration; env vars exist to override individual
/// values without rebuilding.
#[derive(Debug, Clone)]
pub struct CollectorConfig {
    /// Store used for the search request and as the fallback for items
    /// that carry no `storeCode` of their own.
    pub store_code: String,
    /// Category filter sent with every search request.
    pub category_id: i64,
    /// City scope for the search request.
    pub city_id: String,
    /// Items requested per search page.
    pub page_size: u64,
    /// Fixed pause after each enriched item, the self-imposed rate limit.
    pub inter_request_delay_ms: u64,
    /// Per-request timeout for both endpoints.
    pub request_timeout_secs: u64,
    /// Where the output document is written.
    pub output_path: PathBuf,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}

/// Load the collector configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env
/// vars.
///
/// # Errors
///
/// Returns `ConfigError` if a set env var fails to parse.
pub fn load_collector_config() -> Result<CollectorConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_collector_config_from_env()
}

/// Load the collector configuration from env vars already in the process.
///
/// Unlike [`load_collector_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if a set env var fails to parse.
pub fn load_collector_config_from_env() -> Result<CollectorConfig, ConfigError> {
    build_collector_config(|key| std::env::var(key))
}

/// Build the configuration using the provided env-var lookup function.
///
/// This is the core parsing logic, decoupled from the actual environment so
/// it can be tested with a pure `HashMap` lookup.
fn build_collector_config<F>(lookup: F) -> Result<CollectorConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_i64 = |var: &str, default: &str| -> Result<i64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<i64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let store_code = or_default("MAGCAT_STORE_CODE", "770344");
    let category_id = parse_i64("MAGCAT_CATEGORY_ID", "4459")?;
    let city_id = or_default("MAGCAT_CITY_ID", "1");
    let page_size = parse_u64("MAGCAT_PAGE_SIZE", "20")?;
    let inter_request_delay_ms = parse_u64("MAGCAT_INTER_REQUEST_DELAY_MS", "200")?;
    let request_timeout_secs = parse_u64("MAGCAT_REQUEST_TIMEOUT_SECS", "10")?;
    let output_path = PathBuf::from(or_default("MAGCAT_OUTPUT_PATH", "output.json"));

    Ok(CollectorConfig {
        store_code,
        category_id,
        city_id,
        page_size,
        inter_request_delay_ms,
        request_timeout_secs,
        output_path,
    })
}
