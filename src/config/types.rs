use crate::sites::SiteKind;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::PathBuf;
use std::time::Duration;

/// First list page scanned when none is configured
pub const DEFAULT_START_PAGE: u32 = 1;

/// Last list page scanned when neither the config nor the site preset sets one
pub const DEFAULT_END_PAGE: u32 = 5;

/// Per-request timeout in seconds when none is configured
pub const DEFAULT_TIMEOUT_SECS: u64 = 15;

/// Main configuration structure, as read from a TOML file
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Which built-in site adapter parses the shelter's pages
    pub site: SiteKind,

    /// Run settings; anything left out falls back to the site preset
    #[serde(default)]
    pub run: RunSection,
}

/// The `[run]` table of the configuration file
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct RunSection {
    /// URL of the first list page
    pub base_url: Option<String>,

    /// Directory that receives one folder per animal
    pub output_dir: Option<PathBuf>,

    /// First list page to scan (1-based)
    pub start_page: Option<u32>,

    /// Last list page to scan, inclusive
    pub end_page: Option<u32>,

    /// Per-request timeout in seconds
    pub timeout_secs: Option<u64>,

    /// Extra HTTP headers, merged over the default `User-Agent`
    #[serde(default)]
    pub headers: BTreeMap<String, String>,
}

/// Immutable settings for a single scraper run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    /// URL of the first list page
    pub base_url: String,

    /// Directory that receives one folder per animal
    pub output_dir: PathBuf,

    /// First list page to scan (1-based)
    pub start_page: u32,

    /// Last list page to scan, inclusive
    pub end_page: u32,

    /// Extra HTTP headers attached to every request
    pub headers: BTreeMap<String, String>,

    /// Per-request timeout
    pub timeout: Duration,
}

impl RunConfig {
    /// Creates a run configuration with default page range, headers and timeout
    pub fn new(base_url: impl Into<String>, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_url: base_url.into(),
            output_dir: output_dir.into(),
            start_page: DEFAULT_START_PAGE,
            end_page: DEFAULT_END_PAGE,
            headers: BTreeMap::new(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }

    /// Sets the inclusive list page range
    pub fn with_pages(mut self, start_page: u32, end_page: u32) -> Self {
        self.start_page = start_page;
        self.end_page = end_page;
        self
    }

    /// Sets the per-request timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Adds or replaces one HTTP header
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }
}

impl Config {
    /// Resolves the `[run]` table against the selected site's preset
    pub fn run_config(&self) -> RunConfig {
        let preset = self.site.preset();
        let run = &self.run;

        RunConfig {
            base_url: run
                .base_url
                .clone()
                .unwrap_or_else(|| preset.base_url.to_string()),
            output_dir: run
                .output_dir
                .clone()
                .unwrap_or_else(|| PathBuf::from(preset.output_dir)),
            start_page: run.start_page.unwrap_or(DEFAULT_START_PAGE),
            end_page: run.end_page.unwrap_or(preset.end_page),
            headers: run.headers.clone(),
            timeout: Duration::from_secs(run.timeout_secs.unwrap_or(preset.timeout_secs)),
        }
    }
}
