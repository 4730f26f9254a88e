//! Kwrank: a meta-keyword frequency ranker
//!
//! This crate fetches a single web page, extracts the keywords it declares in
//! its `<meta name="keywords">` tag, and ranks them by how often each occurs
//! in the page body. The content type is validated with a HEAD request before
//! the body is ever fetched.

pub mod config;
pub mod output;
pub mod scrape;

use thiserror::Error;

/// Main error type for all scraping and ranking operations
///
/// Every variant is terminal and non-retriable. Errors propagate unchanged
/// from the layer that produced them to the caller of
/// [`scrape::RankingService::rank`]; no layer catches and suppresses.
#[derive(Debug, Error)]
pub enum ScrapeError {
    /// Connection-level failure (refused, reset, DNS, TLS)
    #[error("could not connect to the server: {0}")]
    Connection(String),

    /// The server answered with a non-success HTTP status
    #[error("the server returned an HTTP error status: {status}")]
    Http { status: u16 },

    /// The configured timeout elapsed before the request completed
    #[error("the request timed out")]
    Timeout,

    /// The URL could not be parsed or uses an unsupported scheme
    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    /// The page's Content-Type is not `text/html`
    #[error("unsupported content type: {}", .content_type.as_deref().unwrap_or("(missing)"))]
    InvalidContentType { content_type: Option<String> },

    /// The page declares no meta keywords tag (or the tag has no content)
    #[error("no meta keywords tag found on the page")]
    MetaKeywordsNotFound,

    /// Keyword extraction was attempted before a successful page load
    #[error("page has not been loaded")]
    PageNotLoaded,

    /// Catch-all for transport failures that fit no other variant
    #[error("unexpected scraping error: {0}")]
    Unexpected(String),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Validation error: {0}")]
    Validation(String),
}

/// Result type alias for scraping and ranking operations
pub type Result<T> = std::result::Result<T, ScrapeError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use config::ScrapeConfig;
pub use scrape::{ContentFetcher, FrequencyEntry, PageAnalyzer, RankingService};
