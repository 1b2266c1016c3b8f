//! Adapter for napaluchu.waw.pl

use crate::crawler::{query_page_url, SiteAdapter};
use crate::sites::{labelled_links, resolve_link, selector};
use crate::ExtractionResult;
use scraper::{ElementRef, Html};
use url::Url;

/// Query parameter carrying the list page number
const PAGE_PARAM: &str = "pet_page";

/// Warsaw "Na Paluchu" shelter
#[derive(Debug, Default, Clone, Copy)]
pub struct Warszawa;

impl SiteAdapter for Warszawa {
    fn name(&self) -> &str {
        "warszawa"
    }

    fn find_profile_links(&self, document: &Html, page_url: &Url) -> ExtractionResult<Vec<String>> {
        labelled_links(document, "dowiedz się więcej", page_url)
    }

    /// The name is the first `<h2>`; a nested `<small>` holds the animal's
    /// id and is left out.
    fn find_pet_name(&self, document: &Html) -> ExtractionResult<Option<String>> {
        let heading = selector("h2")?;
        Ok(document
            .select(&heading)
            .next()
            .map(|h2| text_excluding(h2, "small")))
    }

    /// One image per gallery tile: the first `<img>` inside each tile
    fn find_image_urls(&self, document: &Html, page_url: &Url) -> ExtractionResult<Vec<String>> {
        let tile_selector = selector("div.pet-detail-gallery-thumb-square")?;
        let image_selector = selector("img")?;

        let urls: Vec<String> = document
            .select(&tile_selector)
            .filter_map(|tile| tile.select(&image_selector).next())
            .filter_map(|img| img.value().attr("src"))
            .filter_map(|src| resolve_link(src, page_url))
            .collect();

        if urls.is_empty() {
            tracing::warn!(
                "No images found for {} (selector: div.pet-detail-gallery-thumb-square img)",
                page_url
            );
        }
        Ok(urls)
    }

    fn page_url(&self, base_url: &str, page: u32) -> String {
        query_page_url(base_url, PAGE_PARAM, page)
    }
}

/// Text of `element`, skipping anything inside a descendant named `skip`
fn text_excluding(element: ElementRef<'_>, skip: &str) -> String {
    let mut parts = Vec::new();

    for node in element.descendants() {
        let Some(text) = node.value().as_text() else {
            continue;
        };

        let skipped = node
            .ancestors()
            .take_while(|ancestor| ancestor.id() != element.id())
            .any(|ancestor| {
                ancestor
                    .value()
                    .as_element()
                    .map_or(false, |el| el.name() == skip)
            });

        if !skipped {
            parts.push(text.trim());
        }
    }

    parts.concat()
}
