//! Crawler module for list walking and gallery downloads
//!
//! This module contains the core scraping logic, including:
//! - HTTP fetching with outcome classification
//! - The site adapter interface and pagination schemes
//! - Folder and image file naming
//! - Streaming image downloads
//! - Overall two-phase coordination

mod adapter;
mod coordinator;
mod downloader;
mod fetcher;
pub mod namer;

pub use adapter::{path_page_url, query_page_url, SiteAdapter};
pub use coordinator::{Scraper, ScraperState};
pub use downloader::{download_image, DownloadError, DownloadOutcome};
pub use fetcher::{build_http_client, fetch_page, FetchResult, DEFAULT_USER_AGENT};
pub use namer::{TokenSource, UuidTokenSource};

use crate::config::RunConfig;
use crate::output::RunSummary;
use crate::Result;

/// Runs a complete scrape for one site
///
/// This is the main entry point for a run. It will:
/// 1. Validate the configuration and create the output directory
/// 2. Collect profile links from the list pages
/// 3. Download every profile's gallery
/// 4. Return the run summary
///
/// # Arguments
///
/// * `config` - The run configuration
/// * `adapter` - Site-specific extraction
///
/// # Returns
///
/// * `Ok(RunSummary)` - The run finished (individual failures are counted, not raised)
/// * `Err(ScraperError)` - The run could not start
pub async fn scrape<A: SiteAdapter>(config: RunConfig, adapter: A) -> Result<RunSummary> {
    let mut scraper = Scraper::new(config, adapter)?;
    Ok(scraper.run().await)
}
