//! Configuration module for Shelter-Scraper
//!
//! This module handles loading, parsing, and validating TOML configuration files.
//!
//! # Example
//!
//! ```no_run
//! use shelter_scraper::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("wroclaw.toml")).unwrap();
//! println!("Will scan list pages up to {}", config.run_config().end_page);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{
    Config, RunConfig, RunSection, DEFAULT_END_PAGE, DEFAULT_START_PAGE, DEFAULT_TIMEOUT_SECS,
};

// Re-export parser functions
pub use parser::{load_config, parse_config};
pub use validation::validate_run_config;
