//! Adapter for schroniskoczestochowa.pl

use crate::crawler::SiteAdapter;
use crate::sites::{element_text, labelled_links, resolve_link, selector};
use crate::ExtractionResult;
use scraper::Html;
use url::Url;

/// Name selectors, most specific first
const NAME_SELECTORS: &[&str] = &["div.name h4 strong", "h1.title-pets", "h1"];

/// Częstochowa shelter
#[derive(Debug, Default, Clone, Copy)]
pub struct Czestochowa;

impl SiteAdapter for Czestochowa {
    fn name(&self) -> &str {
        "czestochowa"
    }

    fn find_profile_links(&self, document: &Html, page_url: &Url) -> ExtractionResult<Vec<String>> {
        let links = labelled_links(document, "zobacz", page_url)?;
        Ok(links
            .into_iter()
            .filter(|link| link.contains("/zwierzeta/"))
            .collect())
    }

    fn find_pet_name(&self, document: &Html) -> ExtractionResult<Option<String>> {
        for css in NAME_SELECTORS {
            let name_selector = selector(css)?;
            if let Some(element) = document.select(&name_selector).next() {
                return Ok(Some(element_text(element)));
            }
        }
        Ok(None)
    }

    /// One image per slide; slides lazy-load, so `data-src` wins over `src`
    fn find_image_urls(&self, document: &Html, page_url: &Url) -> ExtractionResult<Vec<String>> {
        let gallery_selector = selector("ul.slides")?;
        let slide_selector = selector("li")?;
        let image_selector = selector("img")?;

        let Some(gallery) = document.select(&gallery_selector).next() else {
            return Ok(Vec::new());
        };

        Ok(gallery
            .select(&slide_selector)
            .filter_map(|slide| slide.select(&image_selector).next())
            .filter_map(|img| {
                let attrs = img.value();
                attrs
                    .attr("data-src")
                    .filter(|src| !src.trim().is_empty())
                    .or_else(|| attrs.attr("src"))
            })
            .filter_map(|src| resolve_link(src, page_url))
            .collect())
    }
}
