//! Harvest module - category collection and decomposition.
//!
//! This module provides the core of the category harvester:
//! - **Category**: path parsing into report columns via [`parse_category`]
//! - **Pipeline**: paginated collection via [`fetch_categories`]
//! - **Hierarchy**: parent/child tree of path segments via [`CategoryTree`]

pub mod category;
pub mod hierarchy;
pub mod pipeline;

// Re-export commonly used types
pub use category::{category_id, clean_segment, parse_category, SEGMENT_DELIMITER};
pub use hierarchy::{CategoryNode, CategoryTree, NodeId, TreeView};
pub use pipeline::{accumulate, fetch_categories, HarvestOutcome, HarvestStats, StopReason};
