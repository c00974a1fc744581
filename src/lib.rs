pub mod cli;
pub mod client;
pub mod config;
pub mod executor;
pub mod harvest;
pub mod model;
pub mod progress;
pub mod report;
pub mod traits;

// Re-export common types for convenience
pub use client::BaserowClient;
pub use config::{ConfigError, HarvestConfig};
pub use executor::*;
pub use model::*;
pub use traits::*;
