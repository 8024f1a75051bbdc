//! Shared CLI utilities.

use std::collections::BTreeSet;

/// Parse a comma-separated string into a set, trimming whitespace and
/// discarding empty segments.
pub fn parse_csv(value: &str) -> BTreeSet<String> {
    value.split(',').map(str::trim).filter(|part| !part.is_empty()).map(str::to_string).collect()
}
