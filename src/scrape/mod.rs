//! Scraping core: fetching, page analysis, and keyword ranking
//!
//! The pipeline runs in a strict order for every ranking request:
//! 1. HEAD request to validate the Content-Type is `text/html`
//! 2. GET request to fetch the body
//! 3. Tolerant HTML parse into derived views (keywords, lowercased body)
//! 4. Per-keyword frequency counting and a stable descending sort

mod analyzer;
mod fetcher;
mod ranking;

pub use analyzer::{PageAnalyzer, SUPPORTED_CONTENT_TYPE};
pub use fetcher::ContentFetcher;
pub use ranking::{FrequencyEntry, RankingService};
