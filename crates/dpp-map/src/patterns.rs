//! Industry synonyms for common product-data headers.

use crate::utils::normalize;

/// Lowercase header term and the field path it canonically denotes.
pub const SYNONYMS: &[(&str, &str)] = &[
    ("ean", "identifiers.gtin"),
    ("gtin", "identifiers.gtin"),
    ("upc", "identifiers.gtin"),
    ("barcode", "identifiers.gtin"),
    ("sku", "identifiers.sku"),
    ("brand", "brandName"),
    ("manufacturer", "manufacturer.name"),
    ("producer", "manufacturer.name"),
    ("expiry", "expiryDate"),
    ("expiration", "expiryDate"),
    ("weight", "physicalDimensions.weight"),
    ("width", "physicalDimensions.width"),
    ("height", "physicalDimensions.height"),
    ("depth", "physicalDimensions.depth"),
    ("length", "physicalDimensions.length"),
    ("volume", "physicalDimensions.volume"),
    ("origin", "countryOfOrigin"),
];

/// True when `normalized_header` is a synonym key whose target is `path`.
pub fn is_synonym(normalized_header: &str, path: &str) -> bool {
    SYNONYMS
        .iter()
        .any(|(key, target)| *target == path && normalize(key) == normalized_header)
}
