use serde::{Deserialize, Serialize};

/// One page of rows as returned by the Baserow list-rows endpoint.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RowsPage {
    #[serde(default)]
    pub count: Option<u64>,
    #[serde(default)]
    pub next: Option<String>, // URL of the following page, null on the last one
    #[serde(default)]
    pub previous: Option<String>,
    #[serde(default)]
    pub results: Vec<CategoryRow>,
}

impl RowsPage {
    /// Whether the API advertises a page after this one.
    pub fn has_next(&self) -> bool {
        self.next.as_deref().is_some_and(|n| !n.trim().is_empty())
    }
}

/// A row projected down to its `Category` column.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CategoryRow {
    #[serde(rename = "Category", default)]
    pub category: Option<serde_json::Value>,
}

impl CategoryRow {
    pub fn from_path(path: &str) -> Self {
        Self {
            category: Some(serde_json::Value::String(path.to_string())),
        }
    }

    /// Trimmed category path, or `None` when the cell is missing, not a
    /// string, or blank.
    pub fn category_path(&self) -> Option<&str> {
        match &self.category {
            Some(serde_json::Value::String(s)) => {
                let trimmed = s.trim();
                (!trimmed.is_empty()).then_some(trimmed)
            }
            _ => None,
        }
    }
}

/// A category path decomposed into its report columns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryRecord {
    pub category_id: String,
    pub category_name: String,
    pub parent_category: String, // empty unless the path has 3+ segments
    pub top_category: String,
    pub full_path: String,
}

impl CategoryRecord {
    /// Columns in CSV order.
    pub fn to_row(&self) -> [&str; 5] {
        [
            &self.category_id,
            &self.category_name,
            &self.parent_category,
            &self.top_category,
            &self.full_path,
        ]
    }
}
