//! Brand extraction from product detail responses.

use crate::types::ProductDetail;

/// Detail section type that presents key/value parameter rows.
const TABLE_SECTION_TYPE: &str = "tableType";

/// Parameter label under which the brand is listed in tabular sections.
const BRAND_PARAMETER: &str = "Бренд";

/// Extracts the brand name from a detail response.
///
/// Prefers the structured `brand.name` field when present and non-empty;
/// otherwise scans the tabular detail sections for a parameter labelled
/// "Бренд" and returns its value. `None` when neither yields a value.
#[must_use]
pub fn extract_brand(detail: &ProductDetail) -> Option<String> {
    if let Some(name) = detail.brand.as_ref().and_then(|b| b.name.as_deref()) {
        if !name.is_empty() {
            return Some(name.to_owned());
        }
    }

    detail
        .details
        .iter()
        .filter(|section| section.section_type.as_deref() == Some(TABLE_SECTION_TYPE))
        .flat_map(|section| &section.parameters)
        .find(|parameter| parameter.name.as_deref() == Some(BRAND_PARAMETER))
        .and_then(|parameter| parameter.value.clone())
}
