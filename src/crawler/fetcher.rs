//! HTTP fetcher implementation
//!
//! This module handles every page request the scraper makes:
//! - Building the HTTP client with the run's headers and timeout
//! - GET requests for list and profile pages
//! - Classifying outcomes so callers can tell "no such page" apart from
//!   a transient failure

use crate::config::RunConfig;
use crate::{Result, ScraperError};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::{Client, StatusCode};

/// User agent sent with every request unless the run overrides it
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

/// Result of a fetch operation
#[derive(Debug)]
pub enum FetchResult {
    /// Successfully fetched the page
    Success {
        /// Final URL after redirects
        final_url: String,
        /// Page body content
        body: String,
    },

    /// The server answered 404
    NotFound,

    /// Any other failure: bad status, network error, unreadable body
    Failed {
        /// Error description
        error: String,
    },
}

/// Builds an HTTP client with proper configuration
///
/// Every request carries [`DEFAULT_USER_AGENT`] plus the headers from the
/// run configuration; a configured `User-Agent` replaces the default one.
///
/// # Arguments
///
/// * `config` - The run configuration
///
/// # Returns
///
/// * `Ok(Client)` - Successfully built HTTP client
/// * `Err(ScraperError)` - A header was invalid or the client failed to build
///
/// # Example
///
/// ```no_run
/// use shelter_scraper::config::RunConfig;
/// use shelter_scraper::crawler::build_http_client;
///
/// let config = RunConfig::new("https://example.com/psy/", "out")
///     .with_header("Accept-Language", "pl-PL");
///
/// let client = build_http_client(&config).unwrap();
/// ```
pub fn build_http_client(config: &RunConfig) -> Result<Client> {
    let mut headers = HeaderMap::new();
    for (name, value) in &config.headers {
        let header_name =
            HeaderName::from_bytes(name.as_bytes()).map_err(|e| ScraperError::InvalidHeader {
                name: name.clone(),
                message: e.to_string(),
            })?;
        let header_value = HeaderValue::from_str(value).map_err(|e| ScraperError::InvalidHeader {
            name: name.clone(),
            message: e.to_string(),
        })?;
        headers.insert(header_name, header_value);
    }

    // default_headers must come after user_agent so a configured one wins
    let client = Client::builder()
        .user_agent(DEFAULT_USER_AGENT)
        .default_headers(headers)
        .timeout(config.timeout)
        .gzip(true)
        .brotli(true)
        .build()?;

    Ok(client)
}

/// Fetches a page and classifies the outcome
///
/// | Condition | Result |
/// |-----------|--------|
/// | HTTP 2xx with a readable body | `Success` |
/// | HTTP 404 | `NotFound` |
/// | Any other status | `Failed` |
/// | Timeout, connection or body error | `Failed` |
///
/// No retries are made. This function never returns an error; every
/// failure is folded into the [`FetchResult`].
pub async fn fetch_page(client: &Client, url: &str) -> FetchResult {
    match client.get(url).send().await {
        Ok(response) => {
            let status = response.status();
            let final_url = response.url().to_string();

            if status == StatusCode::NOT_FOUND {
                tracing::debug!("Page {} not found (404)", url);
                return FetchResult::NotFound;
            }

            if !status.is_success() {
                return FetchResult::Failed {
                    error: format!("HTTP {}", status.as_u16()),
                };
            }

            match response.text().await {
                Ok(body) => FetchResult::Success { final_url, body },
                Err(e) => FetchResult::Failed {
                    error: format!("Failed to read body: {}", e),
                },
            }
        }
        Err(e) => FetchResult::Failed {
            error: describe_request_error(&e),
        },
    }
}

/// Turns a reqwest error into a short diagnostic
pub(crate) fn describe_request_error(error: &reqwest::Error) -> String {
    if error.is_timeout() {
        "Request timeout".to_string()
    } else if error.is_connect() {
        format!("Connection failed: {}", error)
    } else if error.is_builder() {
        format!("Invalid request: {}", error)
    } else {
        error.to_string()
    }
}
