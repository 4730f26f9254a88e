//! Ranking service - orchestrates a full keyword ranking for one URL
//!
//! Each `rank` call constructs its own fetcher and analyzer, so concurrent
//! callers ranking different URLs share no mutable state.

use crate::config::ScrapeConfig;
use crate::scrape::{ContentFetcher, PageAnalyzer};
use crate::Result;
use serde::Serialize;

/// One keyword with its occurrence count in the page body
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FrequencyEntry {
    pub keyword: String,
    pub frequency: usize,
}

/// Produces sorted keyword rankings for URLs
#[derive(Debug, Clone)]
pub struct RankingService {
    config: ScrapeConfig,
}

impl RankingService {
    /// Creates a service that ranks with the given configuration
    pub fn new(config: ScrapeConfig) -> Self {
        Self { config }
    }

    /// Ranks the keywords declared by the page at `url`
    ///
    /// Loads the page on a fresh [`PageAnalyzer`], computes the frequency of
    /// every declared keyword, and returns the entries sorted by frequency
    /// descending. The sort is stable: keywords with equal frequency keep
    /// their lexicographic keyword-set order.
    ///
    /// An empty-but-present keywords declaration yields an empty ranking;
    /// a missing declaration is [`crate::ScrapeError::MetaKeywordsNotFound`].
    ///
    /// # Errors
    ///
    /// Every error from the fetch, load, and extraction layers propagates
    /// unchanged.
    pub async fn rank(&self, url: &str) -> Result<Vec<FrequencyEntry>> {
        let fetcher = ContentFetcher::new(&self.config)?;
        let mut analyzer = PageAnalyzer::new(fetcher);

        analyzer.load(url).await?;

        let keywords = analyzer.keywords()?;
        let mut entries = Vec::with_capacity(keywords.len());
        for keyword in keywords {
            let frequency = analyzer.keyword_frequency(&keyword)?;
            entries.push(FrequencyEntry { keyword, frequency });
        }

        sort_by_frequency(&mut entries);

        tracing::info!("ranked {} keywords for {}", entries.len(), url);
        Ok(entries)
    }
}

/// Sorts entries by frequency descending, preserving input order on ties
fn sort_by_frequency(entries: &mut [FrequencyEntry]) {
    // sort_by is stable, which is what makes the tie-break deterministic.
    entries.sort_by(|a, b| b.frequency.cmp(&a.frequency));
}
