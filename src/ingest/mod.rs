// src/ingest/mod.rs
pub mod providers;
pub mod types;

use crate::ingest::types::{DateRange, DocumentFetcher, FetchedDocument};
use metrics::{counter, describe_counter, describe_histogram, histogram};
use once_cell::sync::OnceCell;

/// One-time metrics registration (so series show up on /metrics).
pub(crate) fn ensure_metrics_described() {
    static ONCE: OnceCell<()> = OnceCell::new();
    ONCE.get_or_init(|| {
        describe_counter!(
            "sentinel_documents_scanned_total",
            "Filing documents fetched and scanned."
        );
        describe_counter!(
            "sentinel_documents_skipped_total",
            "Filing documents skipped after a fetch failure."
        );
        describe_counter!(
            "sentinel_search_errors_total",
            "Search index queries that failed and were treated as empty."
        );
        describe_counter!(
            "sentinel_aif_names_found_total",
            "Attorney-in-fact names extracted (per document, before dedup)."
        );
        describe_histogram!("sentinel_fetch_ms", "Document fetch time in milliseconds.");
    });
}

/// Make filing text matchable: decode HTML entities and replace markup with a
/// single space so words on either side of a tag stay apart.
pub fn normalize_document(s: &str) -> String {
    let decoded = html_escape::decode_html_entities(s);

    static RE_TAGS: OnceCell<regex::Regex> = OnceCell::new();
    let re_tags = RE_TAGS.get_or_init(|| regex::Regex::new(r"(?s)</?[A-Za-z!][^>]*>").unwrap());
    re_tags.replace_all(&decoded, " ").into_owned()
}

/// Longest prefix of `s` holding at most `max_chars` characters.
pub fn prefix(s: &str, max_chars: usize) -> &str {
    match s.char_indices().nth(max_chars) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}

/// Search one form type and fetch up to `max_docs` bodies, each cut to
/// `prefix_chars`. A failed search yields an empty sample; a failed fetch
/// skips that document only.
pub async fn fetch_sample(
    fetcher: &dyn DocumentFetcher,
    company: &str,
    form: &str,
    range: DateRange,
    max_docs: usize,
    prefix_chars: usize,
) -> Vec<FetchedDocument> {
    ensure_metrics_described();

    let hits = match fetcher.search(company, &[form], range).await {
        Ok(v) => v,
        Err(e) => {
            tracing::warn!(error = ?e, company, form, provider = fetcher.name(), "search failed");
            counter!("sentinel_search_errors_total").increment(1);
            return Vec::new();
        }
    };

    let mut out = Vec::with_capacity(hits.len().min(max_docs));
    for meta in hits.into_iter().take(max_docs) {
        if meta.locator.is_empty() {
            continue;
        }
        let t0 = std::time::Instant::now();
        match fetcher.fetch_text(&meta.locator).await {
            Ok(body) => {
                histogram!("sentinel_fetch_ms").record(t0.elapsed().as_secs_f64() * 1_000.0);
                counter!("sentinel_documents_scanned_total").increment(1);
                tracing::debug!(company, form, locator = %meta.locator, "document fetched");
                let text = prefix(&body, prefix_chars).to_string();
                out.push(FetchedDocument { meta, text });
            }
            Err(e) => {
                tracing::warn!(error = ?e, company, form, locator = %meta.locator, "document skipped");
                counter!("sentinel_documents_skipped_total").increment(1);
            }
        }
    }
    out
}
