use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A catalog item merged with the brand looked up from the detail endpoint,
/// as it appears in the output document.
///
/// Records are constructed once, appended to the result collection in
/// arrival order, and never mutated. No deduplication is performed: an id
/// that appears on two pages yields two entries.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnrichedProduct {
    /// Numeric product id from the search response.
    pub id: i64,
    /// Display name. Absent when the search item carried none.
    pub name: Option<String>,
    /// Current price in major units, two fractional digits.
    pub price: Option<Decimal>,
    /// Pre-promotion price in major units, when a promotion is active.
    pub old_price: Option<Decimal>,
    /// Brand name from the detail lookup; `None` when the lookup failed or
    /// the detail response carried no usable brand.
    pub brand: Option<String>,
}
