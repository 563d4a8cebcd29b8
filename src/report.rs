//! report.rs: result structures handed to the presentation layer.
//!
//! These are plain data: the CLI prints them as JSON, the HTTP surface
//! returns them as-is.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::analyze::aggregate::AifRecord;
use crate::analyze::scoring::{RiskTier, Signals};

/// Follow-up attached to every scan.
pub const NEXT_STEP: &str = "NEXT STEP: Google each AIF name + company. \
If an AIF is NOT disclosed in the 10-K executive suite or proxy statement, \
you have found Frankenstein Governance: \
the creature shareholders never consented to create.";

/// Outcome of sweeping one company's filings for attorney-in-fact names.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AifScan {
    pub company: String,
    pub total_filings_scanned: usize,
    /// Sorted by name.
    pub attorneys_in_fact: BTreeMap<String, AifRecord>,
    pub aif_count: usize,
    pub instruction: String,
}

impl AifScan {
    pub fn new(company: impl Into<String>, scanned: usize, aifs: BTreeMap<String, AifRecord>) -> Self {
        Self {
            company: company.into(),
            total_filings_scanned: scanned,
            aif_count: aifs.len(),
            attorneys_in_fact: aifs,
            instruction: NEXT_STEP.to_string(),
        }
    }

    pub fn names(&self) -> Vec<String> {
        self.attorneys_in_fact.keys().cloned().collect()
    }
}

/// Full index result for a company with at least one AIF.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndexReport {
    pub company: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ticker: Option<String>,
    pub aif_names: Vec<String>,
    pub signals: Signals,
    pub index: f64,
    pub risk_tier: RiskTier,
    pub risk_description: String,
    pub methodology: String,
}

/// "No AIF detected" is a terminal result of its own, distinct from a CLEAR tier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum IndexOutcome {
    NoAifDetected { company: String },
    Scored(IndexReport),
}

impl IndexOutcome {
    pub fn report(&self) -> Option<&IndexReport> {
        match self {
            Self::Scored(r) => Some(r),
            Self::NoAifDetected { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn no_aif_outcome_shape() {
        let v = serde_json::to_value(IndexOutcome::NoAifDetected {
            company: "Acme".into(),
        })
        .unwrap();
        assert_eq!(v, json!({"outcome": "no_aif_detected", "company": "Acme"}));
    }

    #[test]
    fn scored_outcome_is_flattened() {
        let r = IndexReport {
            company: "Acme".into(),
            ticker: None,
            aif_names: vec!["Ana Lopez".into()],
            signals: Signals::default(),
            index: 0.01,
            risk_tier: RiskTier::Clear,
            risk_description: RiskTier::Clear.description().into(),
            methodology: String::new(),
        };
        let v = serde_json::to_value(IndexOutcome::Scored(r)).unwrap();
        assert_eq!(v["outcome"], "scored");
        assert_eq!(v["risk_tier"], "CLEAR");
        assert_eq!(v["signals"]["valuation_spike"]["status"], "unavailable");
        assert!(v.get("ticker").is_none());
    }

    #[test]
    fn scan_counts_names() {
        let mut m = BTreeMap::new();
        m.insert("B Name".to_string(), AifRecord::default());
        m.insert("A Name".to_string(), AifRecord::default());
        let s = AifScan::new("Acme", 3, m);
        assert_eq!(s.aif_count, 2);
        assert_eq!(s.names(), vec!["A Name".to_string(), "B Name".to_string()]);
        assert!(s.instruction.starts_with("NEXT STEP"));
    }
}
