// src/analyze/mod.rs
//! Core analysis: name extraction, cross-document aggregation and the
//! composite index.

pub mod aggregate;
pub mod names;
pub mod scoring;

// Re-export convenient types.
pub use crate::analyze::aggregate::{aggregate, AifRecord, Aggregator, FilingReference};
pub use crate::analyze::names::{extract_aif_names, extract_with_idioms, is_likely_name, Idiom};
pub use crate::analyze::scoring::{classify, combine, RiskTier, Signals, ValuationReading};
