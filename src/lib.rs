//! Shelter-Scraper: an animal-shelter photo gallery downloader
//!
//! This crate crawls paginated shelter listing pages, collects the profile
//! page of every animal, and saves each profile's photo gallery into its
//! own folder on disk. Site-specific markup handling lives in [`sites`];
//! the generic two-phase engine lives in [`crawler`].

pub mod config;
pub mod crawler;
pub mod output;
pub mod sites;

use thiserror::Error;

/// Main error type for Shelter-Scraper operations
///
/// Only run-level problems surface here. Failures of a single page,
/// profile or image are reported through typed outcomes and never abort
/// a run.
#[derive(Debug, Error)]
pub enum ScraperError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("Invalid header '{name}': {message}")]
    InvalidHeader { name: String, message: String },

    #[error("Failed to create output directory {path}: {source}")]
    OutputDir {
        path: String,
        source: std::io::Error,
    },
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// Errors raised by a site adapter while extracting data from a document
#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("Invalid selector '{selector}': {message}")]
    Selector { selector: String, message: String },

    #[error("{0}")]
    Other(String),
}

/// Result type alias for Shelter-Scraper operations
pub type Result<T> = std::result::Result<T, ScraperError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Result type alias for extraction calls
pub type ExtractionResult<T> = std::result::Result<T, ExtractionError>;

// Re-export commonly used types
pub use config::{Config, RunConfig};
pub use crawler::{Scraper, ScraperState, SiteAdapter};
pub use output::RunSummary;
pub use sites::SiteKind;
