//! Adapter for schroniskowroclaw.pl

use crate::crawler::SiteAdapter;
use crate::sites::{attr_urls, element_text, selector};
use crate::ExtractionResult;
use scraper::Html;
use url::Url;

/// Wrocław shelter, built with the Breakdance page builder
#[derive(Debug, Default, Clone, Copy)]
pub struct Wroclaw;

impl SiteAdapter for Wroclaw {
    fn name(&self) -> &str {
        "wroclaw"
    }

    fn find_profile_links(&self, document: &Html, page_url: &Url) -> ExtractionResult<Vec<String>> {
        attr_urls(document, "a.breakdance-image-link[href]", "href", page_url)
    }

    fn find_pet_name(&self, document: &Html) -> ExtractionResult<Option<String>> {
        let heading = selector("h1.bde-heading")?;
        let name = document.select(&heading).next().map(element_text);

        if name.is_none() {
            tracing::warn!("Pet name heading (h1.bde-heading) not found");
        }
        Ok(name)
    }

    fn find_image_urls(&self, document: &Html, page_url: &Url) -> ExtractionResult<Vec<String>> {
        let urls = attr_urls(document, "img.breakdance-image-object[src]", "src", page_url)?;

        if urls.is_empty() {
            tracing::warn!(
                "No images found for {} (selector: img.breakdance-image-object)",
                page_url
            );
        }
        Ok(urls)
    }
}
