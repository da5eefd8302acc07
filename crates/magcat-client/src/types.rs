//! Magnit API request and response types.
//!
//! ## Observed shape from the live goods API
//!
//! ### Search response
//! `pagination.totalCount` is the catalog-wide item count as seen by the
//! first page; later pages may report a different number while the catalog
//! mutates. `items` may be missing entirely on degraded responses — both
//! fields deserialize through defaults so a thin envelope still parses.
//!
//! ### Prices
//! `price` and `promotion.oldPrice` are integers in minor currency units
//! (kopecks). The API occasionally returns other JSON types in these slots;
//! [`lenient_minor_units`] maps anything that is not an integer to `None`
//! so one malformed price does not drop the whole item.
//!
//! ### Detail response
//! `brand.name` is the structured brand field but is frequently empty or
//! absent; the brand then only appears inside the `details` sections of
//! type `"tableType"` as a `{name, value}` parameter row.

use magcat_core::CollectorConfig;
use serde::{Deserialize, Deserializer, Serialize};

/// Catalog type sent with every request (search body and detail query).
pub(crate) const CATALOG_TYPE: &str = "2";

/// Store type sent with every request.
pub(crate) const STORE_TYPE: &str = "express";

// ---------------------------------------------------------------------------
// Search request
// ---------------------------------------------------------------------------

/// JSON body for the goods search endpoint.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchPayload {
    pub catalog_type: &'static str,
    pub pagination: PageWindow,
    pub sort: SortSpec,
    pub store_code: String,
    pub store_type: &'static str,
    pub categories: Vec<i64>,
    pub city_id: String,
    /// Always empty; the endpoint requires the field to be present.
    pub filters: Vec<serde_json::Value>,
    /// Always empty, like `filters`.
    pub token: String,
}

#[derive(Debug, Serialize)]
pub struct PageWindow {
    pub limit: u64,
    pub offset: u64,
}

/// Fixed descending-popularity ordering.
#[derive(Debug, Serialize)]
pub struct SortSpec {
    pub order: &'static str,
    #[serde(rename = "type")]
    pub kind: &'static str,
}

impl SearchPayload {
    #[must_use]
    pub fn new(config: &CollectorConfig, offset: u64) -> Self {
        Self {
            catalog_type: CATALOG_TYPE,
            pagination: PageWindow {
                limit: config.page_size,
                offset,
            },
            sort: SortSpec {
                order: "desc",
                kind: "popularity",
            },
            store_code: config.store_code.clone(),
            store_type: STORE_TYPE,
            categories: vec![config.category_id],
            city_id: config.city_id.clone(),
            filters: Vec::new(),
            token: String::new(),
        }
    }
}

// ---------------------------------------------------------------------------
// Search response
// ---------------------------------------------------------------------------

/// One page of search results.
#[derive(Debug, Deserialize)]
pub struct SearchPage {
    #[serde(default)]
    pub pagination: Pagination,
    #[serde(default)]
    pub items: Vec<SearchItem>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    #[serde(default)]
    pub total_count: u64,
}

/// A single product as returned by the search endpoint.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchItem {
    pub id: i64,
    #[serde(default)]
    pub name: Option<String>,
    /// Current price in minor units.
    #[serde(default, deserialize_with = "lenient_minor_units")]
    pub price: Option<i64>,
    #[serde(default)]
    pub promotion: Option<Promotion>,
    /// Store the item was priced against; absent items fall back to the
    /// configured default store.
    #[serde(default)]
    pub store_code: Option<String>,
}

impl SearchItem {
    /// Pre-promotion price in minor units, when a promotion is active.
    #[must_use]
    pub fn old_price(&self) -> Option<i64> {
        self.promotion.as_ref().and_then(|p| p.old_price)
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Promotion {
    #[serde(default, deserialize_with = "lenient_minor_units")]
    pub old_price: Option<i64>,
}

// ---------------------------------------------------------------------------
// Detail response
// ---------------------------------------------------------------------------

/// Product detail response; only the brand-bearing parts are modeled.
#[derive(Debug, Deserialize)]
pub struct ProductDetail {
    #[serde(default)]
    pub brand: Option<BrandRef>,
    #[serde(default)]
    pub details: Vec<DetailSection>,
}

#[derive(Debug, Deserialize)]
pub struct BrandRef {
    #[serde(default)]
    pub name: Option<String>,
}

/// A section of the detail page. Tabular sections (`type == "tableType"`)
/// carry key/value parameter rows.
#[derive(Debug, Deserialize)]
pub struct DetailSection {
    #[serde(rename = "type", default)]
    pub section_type: Option<String>,
    #[serde(default)]
    pub parameters: Vec<DetailParameter>,
}

#[derive(Debug, Deserialize)]
pub struct DetailParameter {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub value: Option<String>,
}

/// Deserializes a minor-unit amount, mapping any non-integer JSON value
/// (string, float, object, null) to `None` instead of failing the item.
fn lenient_minor_units<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(value.and_then(|v| v.as_i64()))
}
