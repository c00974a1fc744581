//! Category path decomposition.
//!
//! A category path is a `" > "`-delimited string such as
//! `"Toys > Outdoor > Balls"`. [`parse_category`] turns one path into the
//! [`CategoryRecord`] columns written to the report.

use crate::model::CategoryRecord;

/// Separator between segments of a category path.
pub const SEGMENT_DELIMITER: &str = " > ";

/// Trims a segment and strips apostrophes.
pub fn clean_segment(segment: &str) -> String {
    segment.trim().replace('\'', "")
}

/// Splits a path into cleaned segments.
pub fn segments(full_path: &str) -> Vec<String> {
    full_path.split(SEGMENT_DELIMITER).map(clean_segment).collect()
}

/// Display identifier for a path: the first 32 bits of its BLAKE3 digest,
/// rendered as decimal.
///
/// Stable across runs and platforms. Not collision-free; never use it as a
/// key.
pub fn category_id(full_path: &str) -> String {
    let digest = blake3::hash(full_path.as_bytes());
    let bytes = digest.as_bytes();
    let id = u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]);
    id.to_string()
}

/// Parses a full category path into its report columns.
///
/// The parent column is only filled for paths of three or more segments;
/// `"Top > Leaf"` yields an empty parent even though a second segment
/// exists. `full_path` holds the cleaned segments; the id hashes the path as
/// given.
pub fn parse_category(full_path: &str) -> CategoryRecord {
    let parts = segments(full_path);

    // split() always yields at least one item
    let top_category = parts.first().cloned().unwrap_or_default();
    let category_name = parts.last().cloned().unwrap_or_default();
    let parent_category = if parts.len() > 2 {
        parts[1].clone()
    } else {
        String::new()
    };

    CategoryRecord {
        category_id: category_id(full_path),
        category_name,
        parent_category,
        top_category,
        full_path: parts.join(SEGMENT_DELIMITER),
    }
}
