//! Run accounting
//!
//! Counters gathered while the scraper runs and the summary printed at the end.

use std::path::PathBuf;

/// Counters for a single scraper run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// First list page of the configured range
    pub start_page: u32,

    /// Last list page of the configured range
    pub end_page: u32,

    /// List pages fetched successfully
    pub pages_scanned: u32,

    /// Unique profile URLs collected in the first phase
    pub profiles_found: usize,

    /// Profiles visited in the second phase
    pub profiles_processed: usize,

    /// Profiles abandoned because the page or its folder was unavailable
    pub profiles_skipped: usize,

    /// Images written to disk during this run
    pub images_downloaded: usize,

    /// Images whose destination already existed
    pub images_skipped: usize,

    /// Images that failed to download or save
    pub images_failed: usize,

    /// Directory holding the animal folders
    pub output_dir: PathBuf,
}

impl RunSummary {
    /// Creates an empty summary for the given page range and output directory
    pub fn new(start_page: u32, end_page: u32, output_dir: PathBuf) -> Self {
        Self {
            start_page,
            end_page,
            output_dir,
            ..Self::default()
        }
    }
}

/// Renders the summary as a plain text block
pub fn format_summary(summary: &RunSummary) -> String {
    let mut out = String::new();
    out.push_str("=== Run Summary ===\n");
    out.push_str(&format!(
        "  List pages scanned: {}-{} ({} fetched)\n",
        summary.start_page, summary.end_page, summary.pages_scanned
    ));
    out.push_str(&format!(
        "  Unique profile links: {}\n",
        summary.profiles_found
    ));
    out.push_str(&format!(
        "  Profiles processed: {} ({} skipped)\n",
        summary.profiles_processed, summary.profiles_skipped
    ));
    out.push_str(&format!(
        "  New images downloaded: {}\n",
        summary.images_downloaded
    ));

    if summary.images_skipped > 0 || summary.images_failed > 0 {
        out.push_str(&format!(
            "  Images skipped: {}, failed: {}\n",
            summary.images_skipped, summary.images_failed
        ));
    }

    out.push_str(&format!(
        "  Images saved in: {}\n",
        summary.output_dir.display()
    ));
    out
}

/// Prints the summary to stdout
pub fn print_summary(summary: &RunSummary) {
    print!("{}", format_summary(summary));
}
