//! Rendering of ranking results for the command line
//!
//! Two formats: a human-readable table per URL, and a single JSON document
//! covering every requested URL in input order.

use crate::scrape::FrequencyEntry;
use crate::ScrapeError;
use serde::Serialize;

/// Outcome of ranking one URL, ready for rendering
#[derive(Debug, Clone, Serialize)]
pub struct UrlReport {
    pub url: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub ranking: Option<Vec<FrequencyEntry>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl UrlReport {
    /// Report for a successfully ranked URL
    pub fn success(url: String, ranking: Vec<FrequencyEntry>) -> Self {
        Self {
            url,
            ranking: Some(ranking),
            error: None,
        }
    }

    /// Report for a URL whose ranking failed
    ///
    /// Only the taxonomy's user-displayable message is carried.
    pub fn failure(url: String, error: &ScrapeError) -> Self {
        Self {
            url,
            ranking: None,
            error: Some(error.to_string()),
        }
    }
}

/// Prints one report as a text table
pub fn print_report(report: &UrlReport) {
    println!("=== {} ===", report.url);

    if let Some(error) = &report.error {
        println!("  error: {}", error);
        println!();
        return;
    }

    match report.ranking.as_deref() {
        Some([]) | None => println!("  (no keywords declared)"),
        Some(entries) => {
            let width = entries
                .iter()
                .map(|e| e.keyword.len())
                .max()
                .unwrap_or(0)
                .max("KEYWORD".len());

            println!("  {:<width$}  FREQUENCY", "KEYWORD", width = width);
            for entry in entries {
                println!(
                    "  {:<width$}  {}",
                    entry.keyword,
                    entry.frequency,
                    width = width
                );
            }
        }
    }

    println!();
}

/// Renders every report as one pretty-printed JSON array
pub fn render_json(reports: &[UrlReport]) -> serde_json::Result<String> {
    serde_json::to_string_pretty(reports)
}
