//! The `collect` command: fetch, enrich, and write the catalog.

use magcat_client::{collect_catalog, MagnitClient};

use crate::output;

/// Runs one full collection and writes the output document.
///
/// Upstream request failures never surface here; the collector degrades
/// them per page or per item. A write failure is logged but does not fail
/// the process either.
///
/// # Errors
///
/// Returns an error only for configuration or client construction
/// problems, before any request is made.
pub async fn run() -> anyhow::Result<()> {
    let config = magcat_core::load_collector_config()?;
    let client = MagnitClient::new(config.request_timeout_secs)?;

    let products = collect_catalog(&client, &config).await;

    match output::write_products(&config.output_path, &products) {
        Ok(()) => tracing::info!(
            count = products.len(),
            path = %config.output_path.display(),
            "catalog export written"
        ),
        Err(err) => tracing::error!(
            error = %err,
            path = %config.output_path.display(),
            "failed to write catalog export"
        ),
    }

    Ok(())
}
