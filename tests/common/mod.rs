// Shared fixture filings for integration tests.
#![allow(dead_code)]

use aif_sentinel::ingest::providers::fixture::FixtureFetcher;
use chrono::NaiveDate;

pub const COMPANY: &str = "Acme Holdings";

pub const ANNUAL_REPORT: &str = "<html><body>\
    <p>Item 1C. Cybersecurity</p><p>Our CISO and team members hold undergraduate \
    and/or graduate degrees in their respective fields and have experience at \
    similar companies.</p><p>Item 2. Properties</p>\
    <p>SIGNATURES /s/ Dana Reyes, Chief Executive Officer</p></body></html>";

pub fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 10, 19).unwrap()
}

/// Four Form 4s (one undownloadable) and one 10-K for `COMPANY`, plus noise.
pub fn fixture() -> FixtureFetcher {
    FixtureFetcher::new()
        .with_filing(
            COMPANY,
            "4",
            "2026-03-01",
            "mem://f4-a",
            "Common stock disposed of by reporting person. /s/ Ana Lopez, Attorney-in-Fact",
        )
        .with_filing(
            COMPANY,
            "4",
            "2026-04-01",
            "mem://f4-b",
            "Stock option grant. /s/ Ana Lopez, Attorney-in-Fact",
        )
        .with_filing(
            COMPANY,
            "4",
            "2026-05-01",
            "mem://f4-c",
            "Open market purchase. /s/ Robert Chief, Chief Executive Officer",
        )
        .with_broken_filing(COMPANY, "4", "2026-06-01", "mem://f4-broken")
        .with_filing(COMPANY, "10-K", "2026-02-15", "mem://k-2026", ANNUAL_REPORT)
        .with_filing(
            "Unrelated Corp",
            "4",
            "2026-03-01",
            "mem://other",
            "Shares disposed of. /s/ Ana Lopez, Attorney-in-Fact",
        )
        .with_filing(
            "Direct Signers Inc",
            "4",
            "2026-03-01",
            "mem://direct",
            "/s/ Pat Morgan, Chief Financial Officer",
        )
}
