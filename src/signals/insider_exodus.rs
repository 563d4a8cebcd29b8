//! Insider exodus: share of recent Form 4 filings where a known AIF name
//! co-occurs with a sale or disposition marker.

use once_cell::sync::Lazy;
use regex::Regex;

use super::{mentions_any, sample_documents, searchable, RatioTally, SignalContext};
use crate::config::SampleConfig;
use crate::ingest::types::{DocumentFetcher, FetchedDocument};

/// Transaction code `S` next to its label, in table or XML form. The code
/// letter is matched case-sensitively against the raw text.
static SALE_CODE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?s)(?i:transaction\s*code).{0,200}?["'>\s]S["'<\s]"#)
        .expect("sale code marker compiles")
});

/// Plain-language markers, matched against lowercased text.
const SALE_PHRASES: &[&str] = &["disposed", "sale of"];

pub fn has_sale_marker(raw: &str, lowered: &str) -> bool {
    SALE_CODE.is_match(raw) || SALE_PHRASES.iter().any(|p| lowered.contains(p))
}

pub fn insider_exodus_tally(docs: &[FetchedDocument], aif_names: &[String]) -> RatioTally {
    let mut tally = RatioTally::default();
    for doc in docs {
        let lowered = searchable(&doc.text);
        let hit = mentions_any(&lowered, aif_names) && has_sale_marker(&doc.text, &lowered);
        tally.record(hit);
    }
    tally
}

pub fn insider_exodus_score(docs: &[FetchedDocument], aif_names: &[String]) -> f64 {
    insider_exodus_tally(docs, aif_names).score()
}

pub async fn measure_insider_exodus(
    fetcher: &dyn DocumentFetcher,
    ctx: SignalContext<'_>,
    cfg: &SampleConfig,
) -> f64 {
    let docs = sample_documents(fetcher, ctx.company, ctx.today, cfg).await;
    let tally = insider_exodus_tally(&docs, ctx.aif_names);
    tracing::debug!(
        company = ctx.company,
        aif_sales = tally.hits,
        form4_total = tally.total,
        "insider exodus"
    );
    tally.score()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ingest::types::FilingMetadata;

    fn doc(text: &str) -> FetchedDocument {
        FetchedDocument {
            meta: FilingMetadata {
                form_type: "4".into(),
                file_date: "2025-06-01".into(),
                locator: "x".into(),
            },
            text: text.into(),
        }
    }

    #[test]
    fn xml_transaction_code_counts_as_sale() {
        let raw = "<transactionCoding><transactionCode>S</transactionCode></transactionCoding>";
        assert!(has_sale_marker(raw, &searchable(raw)));
    }

    #[test]
    fn purchase_code_is_not_a_sale() {
        let raw = "<transactionCode>P</transactionCode> Transaction Codes (Instr. 8)";
        assert!(!has_sale_marker(raw, &searchable(raw)));
    }

    #[test]
    fn ratio_over_all_form4s() {
        let names = vec!["Ana Lopez".to_string()];
        let docs = vec![
            doc("Shares disposed of. /s/ Ana Lopez, Attorney-in-Fact"),
            doc("Open market sale of common stock. By Ana Lopez"),
            doc("Grant of options. /s/ Ana Lopez, Attorney-in-Fact"),
            doc("Shares disposed of. /s/ John Carter"),
        ];
        assert!((insider_exodus_score(&docs, &names) - 0.5).abs() < 1e-12);
    }

    #[test]
    fn empty_names_degrade_to_zero() {
        let docs = vec![doc("Shares disposed of.")];
        assert_eq!(insider_exodus_score(&docs, &[]), 0.0);
    }
}
