//! The pagination and enrichment loop.
//!
//! Walks fixed-size search pages up to the total count captured from the
//! very first page, performs one detail lookup per item to attach a brand,
//! and accumulates the merged records in arrival order. Every request is
//! fail-soft: a failed page contributes nothing, a failed detail lookup
//! leaves the brand empty, and the run always completes.

use std::time::Duration;

use magcat_core::{from_minor_units, CollectorConfig, EnrichedProduct};

use crate::brand::extract_brand;
use crate::client::MagnitClient;
use crate::error::ClientError;
use crate::types::{ProductDetail, SearchPage};

/// Source of catalog data.
///
/// Implemented by [`MagnitClient`] for the live API and by fakes in tests,
/// so the collection loop can be exercised without network access.
#[allow(async_fn_in_trait)]
pub trait CatalogSource {
    async fn search_page(
        &self,
        config: &CollectorConfig,
        offset: u64,
    ) -> Result<SearchPage, ClientError>;

    async fn product_detail(
        &self,
        product_id: i64,
        store_code: &str,
    ) -> Result<ProductDetail, ClientError>;
}

impl CatalogSource for MagnitClient {
    async fn search_page(
        &self,
        config: &CollectorConfig,
        offset: u64,
    ) -> Result<SearchPage, ClientError> {
        MagnitClient::search_page(self, config, offset).await
    }

    async fn product_detail(
        &self,
        product_id: i64,
        store_code: &str,
    ) -> Result<ProductDetail, ClientError> {
        MagnitClient::product_detail(self, product_id, store_code).await
    }
}

/// Walks the whole catalog and returns the enriched records.
///
/// The total count is captured once, from the page at offset 0, and bounds
/// the walk for the entire run even if later pages report a different
/// number. Offsets step by the configured page size; a failed or empty page
/// is skipped without aborting. After each enriched item the loop pauses
/// for the configured inter-request delay (skipped when zero).
pub async fn collect_catalog<S: CatalogSource>(
    source: &S,
    config: &CollectorConfig,
) -> Vec<EnrichedProduct> {
    let total = match source.search_page(config, 0).await {
        Ok(page) => page.pagination.total_count,
        Err(err) => {
            tracing::warn!(error = %err, "initial search request failed; treating catalog as empty");
            0
        }
    };
    tracing::info!(total, "catalog size reported by the first page");

    let mut products = Vec::new();
    // Guard against a zero page size wedging the walk at offset 0.
    let step = config.page_size.max(1);
    let mut offset = 0;

    while offset < total {
        let page = match source.search_page(config, offset).await {
            Ok(page) => page,
            Err(err) => {
                tracing::warn!(offset, error = %err, "search page failed; skipping");
                offset += step;
                continue;
            }
        };

        if page.items.is_empty() {
            tracing::info!(offset, "page returned no items; skipping");
            offset += step;
            continue;
        }
        tracing::info!(offset, items = page.items.len(), "processing page");

        for item in page.items {
            let store_code = item
                .store_code
                .clone()
                .unwrap_or_else(|| config.store_code.clone());

            tracing::debug!(product_id = item.id, store_code = %store_code, "fetching brand");
            let brand = match source.product_detail(item.id, &store_code).await {
                Ok(detail) => extract_brand(&detail),
                Err(err) => {
                    tracing::warn!(
                        product_id = item.id,
                        store_code = %store_code,
                        error = %err,
                        "detail lookup failed; leaving brand empty"
                    );
                    None
                }
            };

            let old_price = item.old_price();
            products.push(EnrichedProduct {
                id: item.id,
                name: item.name,
                price: from_minor_units(item.price),
                old_price: from_minor_units(old_price),
                brand,
            });

            if config.inter_request_delay_ms > 0 {
                tokio::time::sleep(Duration::from_millis(config.inter_request_delay_ms)).await;
            }
        }

        offset += step;
    }

    products
}

#[cfg(test)]
#[path = "collect_test.rs"]
mod tests;
