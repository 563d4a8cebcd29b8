// src/ingest/providers/fixture.rs
//! In-memory provider for tests and offline runs.
//!
//! Filings are matched by company (case-insensitive), form type and filing
//! date. A filing without a body simulates a failed download.

use std::path::Path;

use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use chrono::NaiveDate;
use serde::Deserialize;

use crate::ingest::types::{DateRange, DocumentFetcher, FilingMetadata};

#[derive(Debug, Clone, Deserialize)]
pub struct FixtureFiling {
    pub company: String,
    pub form_type: String,
    pub file_date: String,
    pub locator: String,
    #[serde(default)]
    pub body: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct FixtureFetcher {
    filings: Vec<FixtureFiling>,
    search_down: bool,
}

impl FixtureFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load `[{company, form_type, file_date, locator, body?}, ...]` from JSON.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("reading fixture filings from {}", path.display()))?;
        let filings: Vec<FixtureFiling> =
            serde_json::from_str(&content).context("parsing fixture filings json")?;
        Ok(Self {
            filings,
            search_down: false,
        })
    }

    pub fn with_filing(
        mut self,
        company: &str,
        form_type: &str,
        file_date: &str,
        locator: &str,
        body: &str,
    ) -> Self {
        self.filings.push(FixtureFiling {
            company: company.to_string(),
            form_type: form_type.to_string(),
            file_date: file_date.to_string(),
            locator: locator.to_string(),
            body: Some(body.to_string()),
        });
        self
    }

    /// A filing that shows up in search but cannot be downloaded.
    pub fn with_broken_filing(
        mut self,
        company: &str,
        form_type: &str,
        file_date: &str,
        locator: &str,
    ) -> Self {
        self.filings.push(FixtureFiling {
            company: company.to_string(),
            form_type: form_type.to_string(),
            file_date: file_date.to_string(),
            locator: locator.to_string(),
            body: None,
        });
        self
    }

    /// Every search errors out, as if the index were unreachable.
    pub fn with_search_down(mut self) -> Self {
        self.search_down = true;
        self
    }

    pub fn len(&self) -> usize {
        self.filings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.filings.is_empty()
    }
}

fn in_range(file_date: &str, range: DateRange) -> bool {
    match NaiveDate::parse_from_str(file_date, "%Y-%m-%d") {
        Ok(d) => range.contains(d),
        // Undated fixtures are always in range.
        Err(_) => true,
    }
}

#[async_trait]
impl DocumentFetcher for FixtureFetcher {
    async fn search(
        &self,
        company: &str,
        form_types: &[&str],
        range: DateRange,
    ) -> Result<Vec<FilingMetadata>> {
        if self.search_down {
            return Err(anyhow!("fixture search index unavailable"));
        }
        Ok(self
            .filings
            .iter()
            .filter(|f| f.company.eq_ignore_ascii_case(company))
            .filter(|f| form_types.iter().any(|t| t.eq_ignore_ascii_case(&f.form_type)))
            .filter(|f| in_range(&f.file_date, range))
            .map(|f| FilingMetadata {
                form_type: f.form_type.clone(),
                file_date: f.file_date.clone(),
                locator: f.locator.clone(),
            })
            .collect())
    }

    async fn fetch_text(&self, locator: &str) -> Result<String> {
        let filing = self
            .filings
            .iter()
            .find(|f| f.locator == locator)
            .ok_or_else(|| anyhow!("no fixture filing at {locator}"))?;
        filing
            .body
            .clone()
            .ok_or_else(|| anyhow!("fixture download failed for {locator}"))
    }

    fn name(&self) -> &'static str {
        "Fixture"
    }
}
