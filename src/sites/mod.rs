//! Built-in site adapters
//!
//! Each shelter publishes its animals with different markup. This module
//! holds one [`SiteAdapter`](crate::crawler::SiteAdapter) per supported
//! shelter, the presets they ship with, and the small HTML helpers they share.

mod czestochowa;
mod warszawa;
mod wroclaw;

pub use czestochowa::Czestochowa;
pub use warszawa::Warszawa;
pub use wroclaw::Wroclaw;

use crate::{ExtractionError, ExtractionResult};
use scraper::{ElementRef, Html, Selector};
use serde::Deserialize;
use std::fmt;
use url::Url;

/// Supported shelter sites
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SiteKind {
    /// schroniskowroclaw.pl
    Wroclaw,
    /// napaluchu.waw.pl
    Warszawa,
    /// schroniskoczestochowa.pl
    Czestochowa,
}

/// Defaults a site runs with when the configuration leaves them out
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SitePreset {
    pub base_url: &'static str,
    pub output_dir: &'static str,
    pub end_page: u32,
    pub timeout_secs: u64,
}

impl SiteKind {
    /// Returns the site's default run settings
    pub fn preset(&self) -> SitePreset {
        match self {
            Self::Wroclaw => SitePreset {
                base_url: "https://schroniskowroclaw.pl/gatunek-zwierzecia/psy/",
                output_dir: "schronisko_wroc_dataset",
                end_page: 5,
                timeout_secs: 15,
            },
            Self::Warszawa => SitePreset {
                base_url: "https://napaluchu.waw.pl/zwierzeta/zwierzeta-do-adopcji/?pet_breed=-1&pet_sex=0&pet_weight=0&pet_age=0&pet_date_from=&pet_date_to=&pet_name=&submit-form=",
                output_dir: "schronisko_wwa_dataset",
                end_page: 31,
                timeout_secs: 15,
            },
            Self::Czestochowa => SitePreset {
                base_url: "https://schroniskoczestochowa.pl/lista-zwierzat/psy/",
                output_dir: "schronisko_czest_dataset",
                end_page: 5,
                timeout_secs: 20,
            },
        }
    }
}

impl fmt::Display for SiteKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Wroclaw => "wroclaw",
            Self::Warszawa => "warszawa",
            Self::Czestochowa => "czestochowa",
        };
        f.write_str(name)
    }
}

/// Parses a CSS selector, mapping failures to [`ExtractionError`]
pub(crate) fn selector(css: &str) -> ExtractionResult<Selector> {
    Selector::parse(css).map_err(|e| ExtractionError::Selector {
        selector: css.to_string(),
        message: format!("{:?}", e),
    })
}

/// Text content of an element, each text node trimmed and concatenated
pub(crate) fn element_text(element: ElementRef<'_>) -> String {
    element.text().map(str::trim).collect()
}

/// Resolves an href or src against the page it was found on
///
/// Returns None if the value should be ignored:
/// - empty values and fragment-only anchors
/// - javascript:, mailto:, tel: and data: schemes
/// - values that do not resolve to an http(s) URL
pub(crate) fn resolve_link(href: &str, page_url: &Url) -> Option<String> {
    let href = href.trim();

    if href.is_empty() || href.starts_with('#') {
        return None;
    }

    if href.starts_with("javascript:")
        || href.starts_with("mailto:")
        || href.starts_with("tel:")
        || href.starts_with("data:")
    {
        return None;
    }

    match page_url.join(href) {
        Ok(absolute_url) => {
            if absolute_url.scheme() == "http" || absolute_url.scheme() == "https" {
                Some(absolute_url.to_string())
            } else {
                None
            }
        }
        Err(e) => {
            tracing::debug!("Cannot resolve '{}' against {}: {}", href, page_url, e);
            None
        }
    }
}

/// Collects `attr` of every element matching `css`, resolved to absolute URLs
pub(crate) fn attr_urls(
    document: &Html,
    css: &str,
    attr: &str,
    page_url: &Url,
) -> ExtractionResult<Vec<String>> {
    let selector = selector(css)?;

    Ok(document
        .select(&selector)
        .filter_map(|element| element.value().attr(attr))
        .filter_map(|value| resolve_link(value, page_url))
        .collect())
}

/// Collects the resolved `href` of every `<a>` whose text equals `label`
pub(crate) fn labelled_links(
    document: &Html,
    label: &str,
    page_url: &Url,
) -> ExtractionResult<Vec<String>> {
    let selector = selector("a[href]")?;

    Ok(document
        .select(&selector)
        .filter(|element| element_text(*element) == label)
        .filter_map(|element| element.value().attr("href"))
        .filter_map(|href| resolve_link(href, page_url))
        .collect())
}
