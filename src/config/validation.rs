use crate::config::types::{Config, RunConfig};
use crate::{ConfigError, ConfigResult};
use reqwest::header::{HeaderName, HeaderValue};
use url::Url;

/// Validates the entire configuration
pub fn validate(config: &Config) -> ConfigResult<()> {
    validate_run_config(&config.run_config())
}

/// Validates a resolved run configuration
///
/// Called again by the engine itself, so configurations built in code get
/// the same checks as ones loaded from disk.
pub fn validate_run_config(config: &RunConfig) -> ConfigResult<()> {
    validate_base_url(&config.base_url)?;
    validate_page_range(config.start_page, config.end_page)?;

    if config.output_dir.as_os_str().is_empty() {
        return Err(ConfigError::Validation(
            "output_dir cannot be empty".to_string(),
        ));
    }

    if config.timeout.is_zero() {
        return Err(ConfigError::Validation(
            "timeout must be greater than zero".to_string(),
        ));
    }

    for (name, value) in &config.headers {
        validate_header(name, value)?;
    }

    Ok(())
}

/// Validates the list page base URL
fn validate_base_url(base_url: &str) -> ConfigResult<()> {
    let url = Url::parse(base_url)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid base_url '{}': {}", base_url, e)))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(ConfigError::InvalidUrl(format!(
            "base_url '{}' must use http or https",
            base_url
        )));
    }

    Ok(())
}

/// Validates the inclusive list page range
fn validate_page_range(start_page: u32, end_page: u32) -> ConfigResult<()> {
    if start_page < 1 {
        return Err(ConfigError::Validation(format!(
            "start_page must be >= 1, got {}",
            start_page
        )));
    }

    if end_page < start_page {
        return Err(ConfigError::Validation(format!(
            "end_page ({}) must not be lower than start_page ({})",
            end_page, start_page
        )));
    }

    Ok(())
}

/// Validates that a header can be sent as-is
fn validate_header(name: &str, value: &str) -> ConfigResult<()> {
    HeaderName::from_bytes(name.as_bytes())
        .map_err(|_| ConfigError::Validation(format!("Invalid header name '{}'", name)))?;

    HeaderValue::from_str(value).map_err(|_| {
        ConfigError::Validation(format!("Invalid value for header '{}'", name))
    })?;

    Ok(())
}
