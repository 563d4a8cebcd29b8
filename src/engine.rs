//! # Scan Engine
//! Wires fetcher, extractor, aggregator, measurers and the composite scorer.
//!
//! Policy: a company without any extracted attorney-in-fact is reported as
//! `NoAifDetected` and never scored. One bad document never aborts a scan.

use chrono::NaiveDate;
use metrics::counter;

use crate::analyze::aggregate::{Aggregator, FilingReference};
use crate::analyze::scoring::{classify, combine, Signals, METHODOLOGY};
use crate::config::ScanConfig;
use crate::ingest::fetch_sample;
use crate::ingest::types::{DateRange, DocumentFetcher};
use crate::report::{AifScan, IndexOutcome, IndexReport};
use crate::signals::{measure_all, SignalContext};

/// Sweep the configured forms for attorney-in-fact names.
pub async fn scan_company(
    fetcher: &dyn DocumentFetcher,
    company: &str,
    today: NaiveDate,
    cfg: &ScanConfig,
) -> AifScan {
    let sc = &cfg.aif_scan;
    let range = DateRange::new(sc.start_date, today);
    tracing::info!(company, provider = fetcher.name(), forms = sc.forms.len(), "aif scan started");

    let mut agg = Aggregator::new(sc.retained_filings);
    for form in &sc.forms {
        let docs = fetch_sample(fetcher, company, form, range, sc.max_per_form, sc.prefix_chars).await;
        for doc in docs {
            let found = agg.add_document(FilingReference::from(&doc.meta), &doc.text);
            counter!("sentinel_aif_names_found_total").increment(found as u64);
        }
    }

    let scanned = agg.documents_scanned();
    let scan = AifScan::new(company, scanned, agg.finish());
    tracing::info!(company, scanned, aif_count = scan.aif_count, "aif scan finished");
    scan
}

/// Turn measured signals into a report. Pure.
pub fn score_signals(
    company: &str,
    ticker: Option<&str>,
    aif_names: Vec<String>,
    signals: Signals,
) -> IndexReport {
    let index = combine(&signals);
    let tier = classify(index);
    IndexReport {
        company: company.to_string(),
        ticker: ticker.map(str::to_string),
        aif_names,
        signals,
        index,
        risk_tier: tier,
        risk_description: tier.description().to_string(),
        methodology: METHODOLOGY.to_string(),
    }
}

/// Optional inputs of an index run.
#[derive(Debug, Clone, Default)]
pub struct IndexRequest {
    pub company: String,
    pub ticker: Option<String>,
    /// Skip extraction and use these names.
    pub aif_names: Option<Vec<String>>,
    pub valuation_override: Option<f64>,
    /// Last price over its 200-day average; used when no override is given.
    pub price_ratio: Option<f64>,
}

/// Full pipeline: names (given or extracted), four signals, index, tier.
pub async fn run_index(
    fetcher: &dyn DocumentFetcher,
    req: &IndexRequest,
    today: NaiveDate,
    cfg: &ScanConfig,
) -> IndexOutcome {
    let names: Vec<String> = match &req.aif_names {
        Some(given) => given
            .iter()
            .map(|n| n.trim().to_string())
            .filter(|n| !n.is_empty())
            .collect(),
        None => scan_company(fetcher, &req.company, today, cfg).await.names(),
    };

    if names.is_empty() {
        tracing::info!(company = %req.company, "no attorney-in-fact detected");
        return IndexOutcome::NoAifDetected {
            company: req.company.clone(),
        };
    }

    let ctx = SignalContext {
        company: &req.company,
        aif_names: &names,
        today,
    };
    let signals = measure_all(
        fetcher,
        ctx,
        req.ticker.as_deref(),
        req.valuation_override,
        req.price_ratio,
        cfg,
    )
    .await;

    let report = score_signals(&req.company, req.ticker.as_deref(), names, signals);
    tracing::info!(
        company = %req.company,
        index = report.index,
        tier = %report.risk_tier,
        "index computed"
    );
    IndexOutcome::Scored(report)
}
