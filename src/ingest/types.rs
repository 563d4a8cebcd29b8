// src/ingest/types.rs
use anyhow::Result;
use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

/// One search hit: enough to locate and label a filing.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FilingMetadata {
    pub form_type: String, // e.g., "4", "10-K", "DEF 14A"
    pub file_date: String, // ISO date as reported by the index, "unknown" if absent
    pub locator: String,   // full URL (or fixture key) of the document body
}

/// A fetched document body (already cut to the caller's prefix) with its provenance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchedDocument {
    pub meta: FilingMetadata,
    pub text: String,
}

/// Inclusive calendar window for a search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    /// Window ending at `today` and reaching back `days` days.
    pub fn trailing_days(today: NaiveDate, days: i64) -> Self {
        Self {
            start: today - Duration::days(days.max(0)),
            end: today,
        }
    }

    pub fn contains(&self, day: NaiveDate) -> bool {
        self.start <= day && day <= self.end
    }
}

/// Capability the core needs from a filing data provider.
///
/// `search` returning an empty list is the normal "no results" case. Any `Err`
/// from either method is treated by callers as "skip", never as fatal.
#[async_trait::async_trait]
pub trait DocumentFetcher: Send + Sync {
    async fn search(
        &self,
        company: &str,
        form_types: &[&str],
        range: DateRange,
    ) -> Result<Vec<FilingMetadata>>;

    async fn fetch_text(&self, locator: &str) -> Result<String>;

    fn name(&self) -> &'static str;
}
