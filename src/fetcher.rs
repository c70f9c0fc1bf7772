//! HTTP fetcher implementation
//!
//! This module handles all HTTP requests for the scraper and crawler:
//! - Building an HTTP client from a [`FetcherConfig`]
//! - GET requests that normalize transport and HTTP failures into a single
//!   [`FetchError`]
//!
//! The client follows reqwest's default redirect policy, so a 3xx chain that
//! resolves to a 2xx counts as success.

use crate::config::FetcherConfig;
use reqwest::Client;
use std::time::Duration;
use thiserror::Error;

/// A failed page fetch
///
/// Every way a GET can go wrong collapses into one of these two variants so
/// the crawl loop has a single failure signal to recover from.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The server answered with a non-success status
    #[error("HTTP {status} for {url}")]
    Status { url: String, status: u16 },

    /// The request never produced a usable response
    #[error("request failed for {url}: {message}")]
    Transport { url: String, message: String },
}

/// Builds an HTTP client from the given configuration
///
/// # Arguments
///
/// * `config` - The fetcher configuration
///
/// # Returns
///
/// * `Ok(Client)` - Successfully built HTTP client
/// * `Err(reqwest::Error)` - Failed to build client
///
/// # Example
///
/// ```no_run
/// use page_harvest::config::FetcherConfig;
/// use page_harvest::fetcher::build_http_client;
///
/// let client = build_http_client(&FetcherConfig::default()).unwrap();
/// ```
pub fn build_http_client(config: &FetcherConfig) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(config.user_agent.clone())
        .timeout(Duration::from_secs(config.timeout_secs))
        .connect_timeout(Duration::from_secs(10))
        .danger_accept_invalid_certs(config.danger_accept_invalid_certs)
        .gzip(true)
        .brotli(true)
        .build()
}

/// Fetches a URL and returns the response body as text
///
/// Issues a single GET. Redirects are followed by the client's default
/// policy; the status checked here is the one the chain resolves to.
///
/// # Arguments
///
/// * `client` - The HTTP client to use
/// * `url` - The absolute URL to fetch
///
/// # Returns
///
/// * `Ok(String)` - Response body text
/// * `Err(FetchError)` - Network failure, timeout, or non-success status
pub async fn fetch(client: &Client, url: &str) -> Result<String, FetchError> {
    let response = client
        .get(url)
        .send()
        .await
        .map_err(|e| classify_transport_error(url, &e))?;

    let status = response.status();
    if !status.is_success() {
        return Err(FetchError::Status {
            url: url.to_string(),
            status: status.as_u16(),
        });
    }

    response
        .text()
        .await
        .map_err(|e| classify_transport_error(url, &e))
}

/// Maps a reqwest error onto a transport failure with a stable message
fn classify_transport_error(url: &str, error: &reqwest::Error) -> FetchError {
    let message = if error.is_timeout() {
        "request timeout".to_string()
    } else if error.is_connect() {
        "connection failed".to_string()
    } else {
        error.to_string()
    };

    FetchError::Transport {
        url: url.to_string(),
        message,
    }
}
