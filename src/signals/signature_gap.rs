//! Signature gap: share of sampled filings signed through an attorney-in-fact.
//!
//! A document counts as AIF-signed when it mentions a known AIF name and
//! carries an attorney-in-fact or power-of-attorney marker. Everything else in
//! the sample counts as directly signed.

use once_cell::sync::Lazy;
use regex::Regex;

use super::{mentions_any, sample_documents, searchable, RatioTally, SignalContext};
use crate::config::SampleConfig;
use crate::ingest::types::{DocumentFetcher, FetchedDocument};

static POA_MARKER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"attorney[- ]in[- ]fact|power of attorney").expect("poa marker compiles")
});

/// Tally of AIF-signed vs all documents.
pub fn signature_gap_tally(docs: &[FetchedDocument], aif_names: &[String]) -> RatioTally {
    let mut tally = RatioTally::default();
    for doc in docs {
        let text = searchable(&doc.text);
        let aif_signed = mentions_any(&text, aif_names) && POA_MARKER.is_match(&text);
        tally.record(aif_signed);
    }
    tally
}

pub fn signature_gap_score(docs: &[FetchedDocument], aif_names: &[String]) -> f64 {
    signature_gap_tally(docs, aif_names).score()
}

pub async fn measure_signature_gap(
    fetcher: &dyn DocumentFetcher,
    ctx: SignalContext<'_>,
    cfg: &SampleConfig,
) -> f64 {
    let docs = sample_documents(fetcher, ctx.company, ctx.today, cfg).await;
    let tally = signature_gap_tally(&docs, ctx.aif_names);
    tracing::debug!(
        company = ctx.company,
        aif_signed = tally.hits,
        sampled = tally.total,
        "signature gap"
    );
    tally.score()
}
