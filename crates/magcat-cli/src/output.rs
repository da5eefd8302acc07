//! Output document writing.

use std::fs;
use std::path::Path;

use magcat_core::EnrichedProduct;

/// Serializes the full result collection as pretty-printed JSON and writes
/// it to `path` in one operation.
///
/// `serde_json` emits UTF-8 without escaping non-ASCII characters, so
/// Cyrillic product names survive verbatim.
///
/// # Errors
///
/// Returns an error if serialization or the filesystem write fails.
pub fn write_products(path: &Path, products: &[EnrichedProduct]) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(products)?;
    fs::write(path, json)?;
    Ok(())
}
