//! HTTP fetcher implementation
//!
//! This module handles the two HTTP requests a ranking needs:
//! - A HEAD request to read the Content-Type before committing to a download
//! - A GET request to fetch the page body
//!
//! Transport failures are classified into the [`ScrapeError`] taxonomy. No
//! retries are performed; every failure surfaces immediately to the caller.

use crate::config::ScrapeConfig;
use crate::{Result, ScrapeError};
use reqwest::header::HeaderMap;
use reqwest::{Client, Method, Response};
use std::time::Duration;
use url::Url;

/// Performs HEAD/GET requests with a per-request timeout
///
/// One fetcher is constructed per ranking request; nothing is shared across
/// requests.
#[derive(Debug)]
pub struct ContentFetcher {
    client: Client,
    timeout: Duration,
}

impl ContentFetcher {
    /// Creates a fetcher from the given configuration
    ///
    /// # Returns
    ///
    /// * `Ok(ContentFetcher)` - Ready to issue requests
    /// * `Err(ScrapeError::Unexpected)` - The HTTP client could not be built
    pub fn new(config: &ScrapeConfig) -> Result<Self> {
        let client = build_http_client(config)
            .map_err(|e| ScrapeError::Unexpected(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            timeout: config.timeout,
        })
    }

    /// Sends a HEAD request and returns the response headers
    pub async fn fetch_headers(&self, url: &str) -> Result<HeaderMap> {
        let response = self.send(Method::HEAD, url).await?;
        Ok(response.headers().clone())
    }

    /// Sends a GET request and returns the response body as text
    pub async fn fetch_body(&self, url: &str) -> Result<String> {
        let response = self.send(Method::GET, url).await?;
        response.text().await.map_err(classify_transport_error)
    }

    /// Issues one request and maps every failure mode to the error taxonomy
    ///
    /// Non-2xx statuses become [`ScrapeError::Http`]; transport failures are
    /// classified by [`classify_transport_error`].
    async fn send(&self, method: Method, url: &str) -> Result<Response> {
        let url = parse_request_url(url)?;
        tracing::debug!("{} {}", method, url);

        let response = self
            .client
            .request(method, url)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(classify_transport_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(ScrapeError::Http {
                status: status.as_u16(),
            });
        }

        Ok(response)
    }
}

/// Builds the HTTP client used for both requests of a ranking
///
/// TLS verification follows `config.verify_tls`; the original tool always
/// disabled it, here it is an explicit opt-out.
fn build_http_client(config: &ScrapeConfig) -> std::result::Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(config.user_agent.clone())
        .danger_accept_invalid_certs(!config.verify_tls)
        .gzip(true)
        .brotli(true)
        .build()
}

/// Parses and validates a request URL
///
/// Only absolute `http` and `https` URLs are accepted; anything else maps to
/// [`ScrapeError::InvalidUrl`] before a request is ever issued.
pub(crate) fn parse_request_url(raw: &str) -> Result<Url> {
    let url =
        Url::parse(raw).map_err(|e| ScrapeError::InvalidUrl(format!("{}: {}", raw, e)))?;

    match url.scheme() {
        "http" | "https" => Ok(url),
        scheme => Err(ScrapeError::InvalidUrl(format!(
            "unsupported scheme '{}' in {}",
            scheme, raw
        ))),
    }
}

/// Classifies a transport error into the taxonomy
fn classify_transport_error(error: reqwest::Error) -> ScrapeError {
    if error.is_timeout() {
        ScrapeError::Timeout
    } else if error.is_connect() {
        ScrapeError::Connection(error.to_string())
    } else if error.is_builder() {
        ScrapeError::InvalidUrl(error.to_string())
    } else {
        ScrapeError::Unexpected(error.to_string())
    }
}
