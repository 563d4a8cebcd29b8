// src/ingest/providers/edgar.rs
//! EDGAR full-text search provider.
//!
//! `search` queries the search index once per form type (the index labels hits
//! with several related forms, so querying per form keeps the label we asked
//! for). `fetch_text` downloads the raw filing body from the archive.

use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::Deserialize;

use crate::config::EdgarConfig;
use crate::ingest::types::{DateRange, DocumentFetcher, FilingMetadata};

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    hits: Hits,
}

#[derive(Debug, Default, Deserialize)]
struct Hits {
    #[serde(default)]
    hits: Vec<Hit>,
}

#[derive(Debug, Deserialize)]
struct Hit {
    #[serde(rename = "_id", default)]
    id: String,
    #[serde(rename = "_source", default)]
    source: HitSource,
}

#[derive(Debug, Default, Deserialize)]
struct HitSource {
    file_path: Option<String>,
    file_date: Option<String>,
    adsh: Option<String>,
    #[serde(default)]
    ciks: Vec<String>,
}

pub struct EdgarClient {
    http: reqwest::Client,
    search_url: String,
    archive_base: String,
}

impl EdgarClient {
    pub fn new(cfg: &EdgarConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .user_agent(cfg.user_agent.as_str())
            .connect_timeout(Duration::from_secs(4))
            .timeout(Duration::from_secs(cfg.timeout_secs))
            .build()
            .context("building edgar http client")?;
        Ok(Self {
            http,
            search_url: cfg.search_url.clone(),
            archive_base: cfg.archive_base.clone(),
        })
    }

    async fn search_form(
        &self,
        company: &str,
        form: &str,
        range: DateRange,
    ) -> Result<Vec<FilingMetadata>> {
        let query = format!("\"{company}\"");
        let start = range.start.format("%Y-%m-%d").to_string();
        let end = range.end.format("%Y-%m-%d").to_string();
        let resp = self
            .http
            .get(&self.search_url)
            .query(&[
                ("q", query.as_str()),
                ("forms", form),
                ("dateRange", "custom"),
                ("startdt", start.as_str()),
                ("enddt", end.as_str()),
            ])
            .send()
            .await
            .context("edgar search get()")?
            .error_for_status()
            .context("edgar search status")?;
        let body: SearchResponse = resp.json().await.context("edgar search json")?;

        Ok(body
            .hits
            .hits
            .into_iter()
            .filter_map(|h| {
                let locator = locator_for(&self.archive_base, &h)?;
                Some(FilingMetadata {
                    form_type: form.to_string(),
                    file_date: h.source.file_date.unwrap_or_else(|| "unknown".into()),
                    locator,
                })
            })
            .collect())
    }
}

/// Archive URL for a hit: explicit `file_path` when the index provides one,
/// otherwise `edgar/data/<cik>/<accession without dashes>/<document>`.
fn locator_for(archive_base: &str, hit: &Hit) -> Option<String> {
    let base = archive_base.trim_end_matches('/');
    if let Some(p) = hit.source.file_path.as_deref().filter(|p| !p.is_empty()) {
        return Some(format!("{base}/{}", p.trim_start_matches('/')));
    }
    let cik = hit.source.ciks.first()?.trim_start_matches('0');
    let adsh = hit.source.adsh.as_deref()?.replace('-', "");
    let doc = hit.id.split_once(':').map(|(_, d)| d)?;
    if cik.is_empty() || adsh.is_empty() || doc.is_empty() {
        return None;
    }
    Some(format!("{base}/edgar/data/{cik}/{adsh}/{doc}"))
}

#[async_trait]
impl DocumentFetcher for EdgarClient {
    async fn search(
        &self,
        company: &str,
        form_types: &[&str],
        range: DateRange,
    ) -> Result<Vec<FilingMetadata>> {
        let mut out = Vec::new();
        for form in form_types {
            out.extend(self.search_form(company, form, range).await?);
        }
        Ok(out)
    }

    async fn fetch_text(&self, locator: &str) -> Result<String> {
        let resp = self
            .http
            .get(locator)
            .send()
            .await
            .context("edgar archive get()")?
            .error_for_status()
            .context("edgar archive status")?;
        resp.text().await.context("edgar archive .text()")
    }

    fn name(&self) -> &'static str {
        "EDGAR"
    }
}
