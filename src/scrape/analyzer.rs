//! Page analyzer - load lifecycle, keyword extraction, frequency counting
//!
//! The analyzer owns the load state machine for a single page. A successful
//! `load` stores two derived views of the document atomically: the raw
//! meta-keywords declaration and the lowercased inner markup of the `<body>`
//! element. A failed load leaves no partial state behind.
//!
//! The DOM itself is not retained: `scraper::Html` is not `Send`, and ranking
//! futures must be spawnable onto worker tasks, so everything a later query
//! needs is extracted into owned strings at parse time.

use crate::scrape::fetcher::ContentFetcher;
use crate::{Result, ScrapeError};
use reqwest::header::{HeaderMap, CONTENT_TYPE};
use scraper::{Html, Selector};
use std::collections::BTreeSet;

/// The only content type the analyzer will download and parse
pub const SUPPORTED_CONTENT_TYPE: &str = "text/html";

/// Derived views of a successfully loaded page
///
/// Both fields become present together; the invariant that no query runs
/// against a half-loaded page is enforced by wrapping this struct in an
/// `Option` on [`PageAnalyzer`].
#[derive(Debug, Clone)]
struct LoadedPage {
    /// Raw `content` attribute of the meta keywords tag, if the tag exists
    meta_keywords: Option<String>,

    /// Lowercased inner markup of the first `<body>` element
    ///
    /// Inner elements keep their attributes, so attribute values count
    /// towards keyword frequency. A page without a `<body>` yields an empty
    /// string here rather than an error.
    body_lower: String,
}

impl LoadedPage {
    /// Parses raw HTML into the derived views
    ///
    /// Parsing is tolerant: malformed markup never fails, the parser fills in
    /// implied structure as browsers do.
    fn parse(raw_html: &str) -> Self {
        let document = Html::parse_document(raw_html);

        Self {
            meta_keywords: extract_meta_keywords(&document),
            body_lower: extract_body_markup(&document).to_lowercase(),
        }
    }
}

/// Analyzes one web page: load, extract keywords, count frequencies
///
/// State machine: `Unloaded` (initial) -> `Loaded`. A repeated `load` call
/// re-enters validation from scratch and resets to `Unloaded` on any failure.
#[derive(Debug)]
pub struct PageAnalyzer {
    fetcher: ContentFetcher,
    page: Option<LoadedPage>,
}

impl PageAnalyzer {
    /// Creates an analyzer in the unloaded state
    pub fn new(fetcher: ContentFetcher) -> Self {
        Self {
            fetcher,
            page: None,
        }
    }

    /// Whether a page has been loaded successfully
    pub fn is_loaded(&self) -> bool {
        self.page.is_some()
    }

    /// Loads and parses the page at `url`
    ///
    /// Validation order is strict: the Content-Type from a HEAD request is
    /// checked first, and the body GET is only issued for `text/html` pages.
    ///
    /// # Errors
    ///
    /// * [`ScrapeError::InvalidContentType`] - Content-Type missing or not HTML
    /// * Any fetch error, propagated unchanged from the fetcher
    pub async fn load(&mut self, url: &str) -> Result<()> {
        // A failed reload must not leave stale state from a previous load.
        self.page = None;

        let headers = self.fetcher.fetch_headers(url).await?;
        let content_type = content_type_token(&headers);

        if content_type.as_deref() != Some(SUPPORTED_CONTENT_TYPE) {
            tracing::debug!(
                "rejecting {}: content type {:?}",
                url,
                content_type.as_deref().unwrap_or("(missing)")
            );
            return Err(ScrapeError::InvalidContentType { content_type });
        }

        let raw_html = self.fetcher.fetch_body(url).await?;
        self.page = Some(LoadedPage::parse(&raw_html));

        Ok(())
    }

    /// Returns the page's declared keywords, deduplicated and sorted
    ///
    /// The meta content attribute is split on `,`; segments are trimmed and
    /// empty ones dropped.
    ///
    /// # Errors
    ///
    /// * [`ScrapeError::PageNotLoaded`] - `load` has not succeeded yet
    /// * [`ScrapeError::MetaKeywordsNotFound`] - No meta keywords declaration
    pub fn keywords(&self) -> Result<Vec<String>> {
        let page = self.page.as_ref().ok_or(ScrapeError::PageNotLoaded)?;
        let raw = page
            .meta_keywords
            .as_deref()
            .ok_or(ScrapeError::MetaKeywordsNotFound)?;

        Ok(parse_keyword_set(raw))
    }

    /// Counts non-overlapping, case-insensitive occurrences of `keyword` in
    /// the page body markup
    ///
    /// # Errors
    ///
    /// * [`ScrapeError::PageNotLoaded`] - `load` has not succeeded yet
    pub fn keyword_frequency(&self, keyword: &str) -> Result<usize> {
        let page = self.page.as_ref().ok_or(ScrapeError::PageNotLoaded)?;
        Ok(count_occurrences(&page.body_lower, keyword))
    }
}

/// Extracts the content type token from response headers
///
/// The value is lowercased and truncated at the first `;`, so
/// `text/html; charset=utf-8` yields `text/html`. A missing or unreadable
/// header yields `None`.
fn content_type_token(headers: &HeaderMap) -> Option<String> {
    let value = headers.get(CONTENT_TYPE)?.to_str().ok()?;
    let token = value.split(';').next().unwrap_or(value);
    Some(token.trim().to_lowercase())
}

/// Extracts the raw meta keywords declaration from the document head
fn extract_meta_keywords(document: &Html) -> Option<String> {
    let selector = Selector::parse(r#"head > meta[name="keywords"]"#).ok()?;

    document
        .select(&selector)
        .next()?
        .value()
        .attr("content")
        .map(str::to_string)
}

/// Serializes the inner markup of the first `<body>` element
///
/// `inner_html` excludes the body tag itself, so attributes on the body
/// element never appear in the result. A missing `<body>` yields an empty
/// string.
fn extract_body_markup(document: &Html) -> String {
    let selector = match Selector::parse("body") {
        Ok(selector) => selector,
        Err(_) => return String::new(),
    };

    document
        .select(&selector)
        .next()
        .map(|body| body.inner_html())
        .unwrap_or_default()
}

/// Splits a raw meta keywords value into a deduplicated, sorted keyword list
fn parse_keyword_set(raw: &str) -> Vec<String> {
    let keywords: BTreeSet<&str> = raw
        .split(',')
        .map(str::trim)
        .filter(|segment| !segment.is_empty())
        .collect();

    keywords.into_iter().map(str::to_string).collect()
}

/// Standard left-to-right non-overlapping substring count, case-insensitive
///
/// The haystack is expected to be lowercased already; the needle is lowered
/// here. An empty needle counts 0.
fn count_occurrences(body_lower: &str, keyword: &str) -> usize {
    let needle = keyword.to_lowercase();
    if needle.is_empty() {
        return 0;
    }

    body_lower.matches(needle.as_str()).count()
}
