//! Job Page Scraper — turns a job-posting URL into a cleaned job description.
//!
//! Flow: fetch (browser-like GET) → parse HTML → content-region selection →
//!       noise stripping and whitespace normalization → `JobPosting`.

pub mod cleaner;
pub mod fetch;
pub mod html;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::document::ExtractedText;

pub use fetch::JobScraper;

#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Parse error: {0}")]
    Parse(String),
}

/// A scraped job posting. Immutable once produced.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobPosting {
    pub description: String,
    /// Text of the selected content region before cleaning.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub raw_text: Option<String>,
    pub source_url: String,
    pub scraped_at: DateTime<Utc>,
    /// Content selector that produced the text; absent when the full page was used.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub matched_selector: Option<String>,
}

impl JobPosting {
    pub fn from_extracted(
        extracted: ExtractedText,
        raw_text: Option<String>,
        matched_selector: Option<String>,
    ) -> Self {
        Self {
            description: extracted.text,
            raw_text,
            source_url: extracted.source,
            scraped_at: extracted.extracted_at,
            matched_selector,
        }
    }
}
