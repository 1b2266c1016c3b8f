//! Site adapter interface
//!
//! The engine knows nothing about a shelter's markup. A site adapter
//! supplies the three extraction calls and, optionally, its own list page
//! URL scheme.

use crate::ExtractionResult;
use scraper::Html;
use url::Url;

/// Site-specific extraction used by the [`Scraper`](crate::crawler::Scraper)
///
/// Extraction calls take an already parsed document and return plain
/// data. Any error they return is logged by the engine and treated as an
/// empty result.
pub trait SiteAdapter {
    /// Short name used in log output
    fn name(&self) -> &str;

    /// Finds absolute profile page URLs on a list page
    fn find_profile_links(&self, document: &Html, page_url: &Url) -> ExtractionResult<Vec<String>>;

    /// Finds the animal's display name on a profile page
    fn find_pet_name(&self, document: &Html) -> ExtractionResult<Option<String>>;

    /// Finds absolute gallery image URLs on a profile page
    fn find_image_urls(&self, document: &Html, page_url: &Url) -> ExtractionResult<Vec<String>>;

    /// Builds the URL of list page `page`
    ///
    /// Defaults to [`path_page_url`].
    fn page_url(&self, base_url: &str, page: u32) -> String {
        path_page_url(base_url, page)
    }
}

/// Page URL scheme `{base}/page/{n}/`; page 1 is the bare base URL
pub fn path_page_url(base_url: &str, page: u32) -> String {
    if page <= 1 {
        base_url.to_string()
    } else {
        format!("{}/page/{}/", base_url.trim_end_matches('/'), page)
    }
}

/// Page URL scheme `{base}?{param}={n}` (or `&` if the base has a query);
/// page 1 is the bare base URL
pub fn query_page_url(base_url: &str, param: &str, page: u32) -> String {
    if page <= 1 {
        return base_url.to_string();
    }

    let separator = if base_url.contains('?') { '&' } else { '?' };
    format!("{}{}{}={}", base_url, separator, param, page)
}
