// tests/pipeline_fixture.rs
//
// Scan, measurers and index run against in-memory filings.

mod common;

use aif_sentinel::ingest::providers::fixture::FixtureFetcher;
use aif_sentinel::signals::{
    measure_insider_exodus, measure_metadata_void, measure_signature_gap, SignalContext,
};
use aif_sentinel::{
    run_index, scan_company, IndexOutcome, IndexRequest, RiskTier, ScanConfig, ValuationReading,
};
use common::{fixture, today, COMPANY};

fn names() -> Vec<String> {
    vec!["Ana Lopez".to_string()]
}

#[tokio::test]
async fn scan_collects_names_and_skips_failed_downloads() {
    let cfg = ScanConfig::default();
    let scan = scan_company(&fixture(), COMPANY, today(), &cfg).await;

    assert_eq!(scan.company, COMPANY);
    assert_eq!(scan.total_filings_scanned, 4);
    assert_eq!(scan.names(), names());
    let rec = &scan.attorneys_in_fact["Ana Lopez"];
    assert_eq!(rec.filing_count, 2);
    assert_eq!(rec.form_types.iter().cloned().collect::<Vec<_>>(), vec!["4".to_string()]);
    assert_eq!(rec.filings[0].locator, "mem://f4-a");
}

#[tokio::test]
async fn measurers_score_the_sample() {
    let cfg = ScanConfig::default();
    let f = fixture();
    let names = names();
    let ctx = SignalContext {
        company: COMPANY,
        aif_names: &names,
        today: today(),
    };

    // 2 AIF-signed of 3 downloadable Form 4s + 1 10-K
    let gap = measure_signature_gap(&f, ctx, &cfg.signature_gap).await;
    assert!((gap - 0.5).abs() < 1e-12, "gap {gap}");

    // 1 AIF sale of 3 downloadable Form 4s
    let exodus = measure_insider_exodus(&f, ctx, &cfg.insider_exodus).await;
    assert!((exodus - 0.333).abs() < 1e-12, "exodus {exodus}");

    let void = measure_metadata_void(&f, ctx, &cfg.metadata_void).await;
    assert_eq!(void, 1.0);
}

#[tokio::test]
async fn lookback_window_excludes_old_filings() {
    let mut cfg = ScanConfig::default();
    cfg.insider_exodus.lookback_days = 30;
    let names = names();
    let ctx = SignalContext {
        company: COMPANY,
        aif_names: &names,
        today: today(),
    };
    assert_eq!(measure_insider_exodus(&fixture(), ctx, &cfg.insider_exodus).await, 0.0);
}

#[tokio::test]
async fn index_run_extracts_then_scores() {
    let cfg = ScanConfig::default();
    let req = IndexRequest {
        company: COMPANY.to_string(),
        ticker: Some("ACME".to_string()),
        ..Default::default()
    };
    let outcome = run_index(&fixture(), &req, today(), &cfg).await;
    let report = outcome.report().expect("scored");

    assert_eq!(report.aif_names, names());
    assert_eq!(report.signals.valuation_spike, ValuationReading::Unavailable);
    assert!((report.index - 0.1885).abs() < 1e-3, "index {}", report.index);
    assert_eq!(report.risk_tier, RiskTier::Clear);
    assert_eq!(report.ticker.as_deref(), Some("ACME"));
}

#[tokio::test]
async fn valuation_override_lifts_the_index() {
    let cfg = ScanConfig::default();
    let req = IndexRequest {
        company: COMPANY.to_string(),
        valuation_override: Some(1.0),
        ..Default::default()
    };
    let report = run_index(&fixture(), &req, today(), &cfg)
        .await
        .report()
        .cloned()
        .expect("scored");
    assert_eq!(report.signals.valuation_spike, ValuationReading::Measured(1.0));
    assert!((report.index - 0.596).abs() < 2e-3, "index {}", report.index);
    assert_eq!(report.risk_tier, RiskTier::Warn);
}

#[tokio::test]
async fn company_without_aif_is_not_scored() {
    let cfg = ScanConfig::default();
    let req = IndexRequest {
        company: "Direct Signers Inc".to_string(),
        ..Default::default()
    };
    let outcome = run_index(&fixture(), &req, today(), &cfg).await;
    assert_eq!(
        outcome,
        IndexOutcome::NoAifDetected {
            company: "Direct Signers Inc".to_string()
        }
    );
}

#[tokio::test]
async fn blank_name_override_counts_as_no_aif() {
    let cfg = ScanConfig::default();
    let req = IndexRequest {
        company: COMPANY.to_string(),
        aif_names: Some(vec!["  ".to_string(), String::new()]),
        ..Default::default()
    };
    let outcome = run_index(&fixture(), &req, today(), &cfg).await;
    assert!(outcome.report().is_none());
}

#[tokio::test]
async fn unreachable_index_degrades_to_floor() {
    let cfg = ScanConfig::default();
    let down = FixtureFetcher::new().with_search_down();

    let scan = scan_company(&down, COMPANY, today(), &cfg).await;
    assert_eq!(scan.total_filings_scanned, 0);
    assert_eq!(scan.aif_count, 0);

    let req = IndexRequest {
        company: COMPANY.to_string(),
        aif_names: Some(names()),
        ..Default::default()
    };
    let report = run_index(&down, &req, today(), &cfg)
        .await
        .report()
        .cloned()
        .expect("given names are scored");
    assert_eq!(report.signals.signature_gap, 0.0);
    assert_eq!(report.signals.insider_exodus, 0.0);
    assert_eq!(report.signals.metadata_void, 0.0);
    assert!((report.index - 0.01).abs() < 1e-12);
    assert_eq!(report.risk_tier, RiskTier::Clear);
}

#[tokio::test]
async fn demo_fixture_file_loads_and_scans() {
    let path = std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures/demo_filings.json");
    let f = FixtureFetcher::from_json_file(&path).expect("demo fixture parses");
    assert_eq!(f.len(), 6);

    let cfg = ScanConfig::default();
    let scan = scan_company(&f, "Acme Holdings", today(), &cfg).await;
    // the 8-K has no body and is skipped
    assert_eq!(scan.total_filings_scanned, 5);
    assert_eq!(scan.names(), vec!["Ana Lopez".to_string(), "Ben Ortiz".to_string()]);
    assert_eq!(scan.attorneys_in_fact["Ben Ortiz"].filing_count, 2);

    let names = scan.names();
    let ctx = SignalContext {
        company: "Acme Holdings",
        aif_names: &names,
        today: today(),
    };
    // coded sale co-signed by Ana Lopez, out of three Form 4s
    let exodus = measure_insider_exodus(&f, ctx, &cfg.insider_exodus).await;
    assert!((exodus - 0.333).abs() < 1e-12, "exodus {exodus}");
}

#[test]
fn extracted_names_match_their_own_filing() {
    use aif_sentinel::signals::{insider_exodus_score, signature_gap_score};
    use aif_sentinel::{extract_aif_names, FetchedDocument, FilingMetadata};

    for body in [
        "Shares disposed of. /s/ Jane Q Smith, Attorney-in-Fact",
        "Shares disposed of. /s/ Jane Q. Smith, Attorney-in-Fact",
    ] {
        let names: Vec<String> = extract_aif_names(body).into_iter().collect();
        assert_eq!(names, vec!["Jane Q. Smith".to_string()]);

        let docs = vec![FetchedDocument {
            meta: FilingMetadata {
                form_type: "4".into(),
                file_date: "2026-03-01".into(),
                locator: "mem://initial".into(),
            },
            text: body.into(),
        }];
        assert_eq!(signature_gap_score(&docs, &names), 1.0, "gap for {body:?}");
        assert_eq!(insider_exodus_score(&docs, &names), 1.0, "exodus for {body:?}");
    }
}
