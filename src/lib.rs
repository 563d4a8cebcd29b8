// src/lib.rs
// Public library surface for the binary and integration tests.

pub mod analyze;
pub mod api;
pub mod config;
pub mod engine;
pub mod ingest;
pub mod metrics;
pub mod report;
pub mod signals;

// ---- Re-exports for stable public API ----
pub use crate::analyze::{
    aggregate, classify, combine, extract_aif_names, AifRecord, FilingReference, RiskTier,
    Signals, ValuationReading,
};
pub use crate::api::router;
pub use crate::config::ScanConfig;
pub use crate::engine::{run_index, scan_company, score_signals, IndexRequest};
pub use crate::ingest::types::{DateRange, DocumentFetcher, FetchedDocument, FilingMetadata};
pub use crate::report::{AifScan, IndexOutcome, IndexReport};
pub use crate::signals::{
    measure_insider_exodus, measure_metadata_void, measure_signature_gap,
    measure_valuation_spike, SignalContext,
};
