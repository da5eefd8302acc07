//! Conversion from minor currency units (kopecks) to major-unit decimals.

use rust_decimal::Decimal;

/// Converts an amount in minor currency units into a major-unit decimal
/// with exactly two fractional digits (`12345` → `123.45`).
///
/// `None` maps to `None`. Non-integer wire values never reach this
/// function; the lenient wire deserializer has already turned them into
/// `None`.
#[must_use]
pub fn from_minor_units(minor: Option<i64>) -> Option<Decimal> {
    minor.map(|units| Decimal::new(units, 2))
}
