//! Run configuration for a harvest.
//!
//! A [`HarvestConfig`] is built once from the command line and handed to the
//! client and executor. Nothing here is global.

use std::fmt;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// Rows requested per page.
pub const PAGE_SIZE: u32 = 200;

/// Column projected from the table.
pub const CATEGORY_FIELD: &str = "Category";

/// Report location, relative to the working directory.
pub const DEFAULT_OUTPUT: &str = "data/dsz-categories.csv";

/// Tree dump written next to the CSV report.
pub const DEFAULT_JSON_OUTPUT: &str = "data/dsz-categories.json";

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Argument '{0}' must not be empty")]
    EmptyArgument(&'static str),
    #[error("Invalid API URL '{0}': expected http:// or https://")]
    InvalidUrl(String),
}

#[derive(Clone)]
pub struct HarvestConfig {
    /// Base API URL without trailing slash
    pub api_url: String,
    pub table_id: String,
    pub api_token: String,
    pub output_path: PathBuf,
    /// `None` disables the JSON tree dump
    pub json_path: Option<PathBuf>,
    pub page_size: u32,
    /// Per-request timeout; unset means the client default (no limit)
    pub timeout: Option<Duration>,
}

impl HarvestConfig {
    /// Builds a config from the three positional arguments.
    ///
    /// Trailing slashes on `api_url` are stripped. Blank arguments are
    /// rejected.
    pub fn new(api_url: &str, table_id: &str, api_token: &str) -> Result<Self, ConfigError> {
        let api_url = api_url.trim().trim_end_matches('/');
        let table_id = table_id.trim();
        let api_token = api_token.trim();

        if api_url.is_empty() {
            return Err(ConfigError::EmptyArgument("api_url"));
        }
        if table_id.is_empty() {
            return Err(ConfigError::EmptyArgument("table_id"));
        }
        if api_token.is_empty() {
            return Err(ConfigError::EmptyArgument("api_token"));
        }
        if !(api_url.starts_with("http://") || api_url.starts_with("https://")) {
            return Err(ConfigError::InvalidUrl(api_url.to_string()));
        }

        Ok(Self {
            api_url: api_url.to_string(),
            table_id: table_id.to_string(),
            api_token: api_token.to_string(),
            output_path: PathBuf::from(DEFAULT_OUTPUT),
            json_path: Some(PathBuf::from(DEFAULT_JSON_OUTPUT)),
            page_size: PAGE_SIZE,
            timeout: None,
        })
    }

    pub fn with_output(mut self, path: impl Into<PathBuf>) -> Self {
        self.output_path = path.into();
        self
    }

    pub fn with_json_output(mut self, path: Option<PathBuf>) -> Self {
        self.json_path = path;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Endpoint listing the rows of the configured table.
    pub fn rows_endpoint(&self) -> String {
        format!(
            "{}/api/database/rows/table/{}/",
            self.api_url, self.table_id
        )
    }
}

// Keeps the token out of logs.
impl fmt::Debug for HarvestConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HarvestConfig")
            .field("api_url", &self.api_url)
            .field("table_id", &self.table_id)
            .field("api_token", &"***")
            .field("output_path", &self.output_path)
            .field("json_path", &self.json_path)
            .field("page_size", &self.page_size)
            .field("timeout", &self.timeout)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trailing_slashes_are_stripped() {
        let config = HarvestConfig::new("https://api.baserow.io//", "123", "tok").unwrap();
        assert_eq!(config.api_url, "https://api.baserow.io");
        assert_eq!(
            config.rows_endpoint(),
            "https://api.baserow.io/api/database/rows/table/123/"
        );
    }

    #[test]
    fn test_defaults() {
        let config = HarvestConfig::new("http://localhost", "9", "tok").unwrap();
        assert_eq!(config.page_size, 200);
        assert_eq!(config.output_path, PathBuf::from("data/dsz-categories.csv"));
        assert!(config.timeout.is_none());
    }

    #[test]
    fn test_builder_overrides() {
        let config = HarvestConfig::new("http://localhost", "9", "tok")
            .unwrap()
            .with_output("/tmp/out/cats.csv")
            .with_json_output(None)
            .with_timeout(Duration::from_secs(5));
        assert_eq!(config.output_path, PathBuf::from("/tmp/out/cats.csv"));
        assert!(config.json_path.is_none());
        assert_eq!(config.timeout, Some(Duration::from_secs(5)));
    }

    #[test]
    fn test_rejects_blank_and_schemeless_arguments() {
        assert_eq!(
            HarvestConfig::new("https://x", " ", "tok").unwrap_err(),
            ConfigError::EmptyArgument("table_id")
        );
        assert_eq!(
            HarvestConfig::new("/", "1", "tok").unwrap_err(),
            ConfigError::EmptyArgument("api_url")
        );
        assert!(matches!(
            HarvestConfig::new("api.baserow.io", "1", "tok"),
            Err(ConfigError::InvalidUrl(_))
        ));
    }

    #[test]
    fn test_debug_redacts_token() {
        let config = HarvestConfig::new("https://x", "1", "secret-token").unwrap();
        let rendered = format!("{:?}", config);
        assert!(!rendered.contains("secret-token"));
        assert!(rendered.contains("***"));
    }
}
