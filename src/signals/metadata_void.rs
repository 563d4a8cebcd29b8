//! Metadata void ("disclosure of vacuum").
//!
//! Finds the cybersecurity governance section of an annual report (from the
//! "Item 1C" / "Cybersecurity" heading to the next item heading), counts how
//! many boilerplate qualification phrasings it contains, and scales three or
//! more distinct hits to 1.0. Across documents the worst (maximum) score wins.

use once_cell::sync::Lazy;
use regex::Regex;

use super::{sample_documents, SignalContext};
use crate::analyze::scoring::round_to;
use crate::config::SampleConfig;
use crate::ingest::types::{DocumentFetcher, FetchedDocument};
use crate::ingest::{normalize_document, prefix};

/// Characters of a located section that are inspected.
pub const SECTION_SLICE_CHARS: usize = 10_000;

/// Distinct boilerplate hits that saturate the score.
const SATURATION: f64 = 3.0;

static ITEM_1C_HEADING: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)item\s*1c\b").expect("item 1c heading compiles"));

static SECTION_END: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)item\s*(?:1d|2)\b|properties").expect("section end compiles")
});

/// Used only for filings without an Item 1C heading.
static CYBER_SECTION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?is)cybersecurity(.*?)(?:item\s*(?:1d|2)\b|properties)")
        .expect("cybersecurity section compiles")
});

static VACANCY_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"undergraduate\s+and\s*[/\\]\s*or\s+graduate\s+degree",
        r"holds?\s+(?:undergraduate|graduate)\s+(?:and\s*[/\\]\s*or\s+(?:undergraduate|graduate)\s+)?degree",
        r"degrees?\s+in\s+(?:their|his|her)\s+respective\s+field",
        r"experience\s+managing\s+risks?\s+at\s+(?:our|the)\s+company",
        r"similar\s+(?:companies|organizations|enterprises)",
    ]
    .iter()
    .map(|p| Regex::new(&format!("(?i){p}")).expect("vacancy pattern compiles"))
    .collect()
});

/// Body of the cybersecurity section in `text`.
///
/// Each "Item 1C" heading opens a candidate that runs to the next item
/// heading. Candidates that run past another "Item 1C" heading are
/// cross-references and are dropped; of the rest (table of contents, body)
/// the longest is the body. Without any Item 1C heading, the longest span
/// after a "cybersecurity" mention is used.
pub fn cybersecurity_section(text: &str) -> Option<&str> {
    let headings: Vec<_> = ITEM_1C_HEADING.find_iter(text).collect();
    if headings.is_empty() {
        return CYBER_SECTION
            .captures_iter(text)
            .filter_map(|c| c.get(1))
            .map(|m| m.as_str())
            .max_by_key(|s| s.len());
    }
    headings
        .iter()
        .enumerate()
        .filter_map(|(i, h)| {
            let end = SECTION_END.find_at(text, h.end())?;
            let next = headings.get(i + 1).map(|n| n.start());
            if next.is_some_and(|n| n < end.start()) {
                return None;
            }
            Some(&text[h.end()..end.start()])
        })
        .max_by_key(|s| s.len())
}

/// Vacuity of one document, or `None` if it has no cybersecurity section.
pub fn section_vacuity(text: &str) -> Option<f64> {
    let normalized = normalize_document(text);
    let section = cybersecurity_section(&normalized)?;
    let slice = prefix(section, SECTION_SLICE_CHARS);
    let hits = VACANCY_PATTERNS.iter().filter(|re| re.is_match(slice)).count();
    Some((hits as f64 / SATURATION).min(1.0))
}

/// Maximum vacuity across documents, rounded to 3 decimals; 0.0 when no
/// document has a section.
pub fn metadata_void_score(docs: &[FetchedDocument]) -> f64 {
    let worst = docs
        .iter()
        .filter_map(|d| section_vacuity(&d.text))
        .fold(None, |acc: Option<f64>, v| Some(acc.map_or(v, |a| a.max(v))));
    round_to(worst.unwrap_or(0.0), 3)
}

pub async fn measure_metadata_void(
    fetcher: &dyn DocumentFetcher,
    ctx: SignalContext<'_>,
    cfg: &SampleConfig,
) -> f64 {
    let docs = sample_documents(fetcher, ctx.company, ctx.today, cfg).await;
    let score = metadata_void_score(&docs);
    tracing::debug!(company = ctx.company, sampled = docs.len(), score, "metadata void");
    score
}
