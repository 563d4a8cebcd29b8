// src/signals/mod.rs
//! The four governance signals.
//!
//! Each measurer has a pure scoring function over already-fetched documents
//! and an async wrapper that samples documents through a `DocumentFetcher`.
//! Measurers do not depend on each other; `measure_all` runs them
//! concurrently.

pub mod insider_exodus;
pub mod metadata_void;
pub mod signature_gap;
pub mod valuation_spike;

use chrono::NaiveDate;

use crate::analyze::scoring::{round_to, Signals};
use crate::config::{SampleConfig, ScanConfig};
use crate::ingest::types::{DateRange, DocumentFetcher, FetchedDocument};
use crate::ingest::{fetch_sample, normalize_document};

pub use insider_exodus::{insider_exodus_score, measure_insider_exodus};
pub use metadata_void::{measure_metadata_void, metadata_void_score, section_vacuity};
pub use signature_gap::{measure_signature_gap, signature_gap_score};
pub use valuation_spike::{measure_valuation_spike, valuation_from_ratio};

/// Inputs shared by the document-based measurers.
#[derive(Debug, Clone, Copy)]
pub struct SignalContext<'a> {
    pub company: &'a str,
    pub aif_names: &'a [String],
    pub today: NaiveDate,
}

/// Hit/total counter over a document sample.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RatioTally {
    pub hits: usize,
    pub total: usize,
}

impl RatioTally {
    pub fn record(&mut self, hit: bool) {
        self.total += 1;
        if hit {
            self.hits += 1;
        }
    }

    /// hits / total rounded to 3 decimals; an empty sample scores 0.0.
    pub fn score(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        round_to(self.hits as f64 / self.total as f64, 3)
    }
}

/// Lowercased, single-spaced form with the period dropped from one-letter
/// initials, so "Jane Q. Smith" and "Jane Q Smith" compare equal.
fn match_key(text: &str) -> String {
    text.split_whitespace()
        .map(|w| {
            let mut chars = w.chars();
            match (chars.next(), chars.next(), chars.next()) {
                (Some(c), Some('.'), None) if c.is_alphabetic() => c.to_string(),
                _ => w.to_string(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// Markup-free `match_key` of a document, for phrase and name lookups.
pub(crate) fn searchable(text: &str) -> String {
    match_key(&normalize_document(text))
}

/// True when any non-empty name occurs in `haystack` (already `searchable`).
pub(crate) fn mentions_any(haystack: &str, names: &[String]) -> bool {
    names
        .iter()
        .map(|n| match_key(n))
        .any(|n| !n.is_empty() && haystack.contains(n.as_str()))
}

/// Fetch the sample for one measurer: every configured form, each capped.
pub(crate) async fn sample_documents(
    fetcher: &dyn DocumentFetcher,
    company: &str,
    today: NaiveDate,
    cfg: &SampleConfig,
) -> Vec<FetchedDocument> {
    let range = DateRange::trailing_days(today, cfg.lookback_days);
    let mut docs = Vec::new();
    for form in &cfg.forms {
        docs.extend(
            fetch_sample(fetcher, company, form, range, cfg.max_per_form, cfg.prefix_chars).await,
        );
    }
    docs
}

/// Measure all four signals concurrently.
pub async fn measure_all(
    fetcher: &dyn DocumentFetcher,
    ctx: SignalContext<'_>,
    ticker: Option<&str>,
    valuation_override: Option<f64>,
    price_ratio: Option<f64>,
    cfg: &ScanConfig,
) -> Signals {
    let (signature_gap, insider_exodus, metadata_void) = tokio::join!(
        measure_signature_gap(fetcher, ctx, &cfg.signature_gap),
        measure_insider_exodus(fetcher, ctx, &cfg.insider_exodus),
        measure_metadata_void(fetcher, ctx, &cfg.metadata_void),
    );
    let valuation_spike = measure_valuation_spike(ticker, valuation_override, price_ratio);

    tracing::info!(
        company = ctx.company,
        signature_gap,
        valuation_available = valuation_spike.is_available(),
        insider_exodus,
        metadata_void,
        "signals measured"
    );

    Signals {
        signature_gap,
        valuation_spike,
        insider_exodus,
        metadata_void,
    }
}
