// src/analyze/aggregate.rs
//! Cross-document merge of extracted names.
//!
//! Keys are canonical names (exact-string dedup). Form types form a set;
//! filing references keep discovery order and are capped at `retained`,
//! while `filing_count` keeps counting past the cap.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

use crate::analyze::names::extract_aif_names;
use crate::ingest::types::{FetchedDocument, FilingMetadata};

/// Default number of references kept per name.
pub const DEFAULT_RETAINED_FILINGS: usize = 5;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilingReference {
    #[serde(rename = "form")]
    pub form_type: String,
    #[serde(rename = "date")]
    pub file_date: String,
    #[serde(rename = "url")]
    pub locator: String,
}

impl From<&FilingMetadata> for FilingReference {
    fn from(m: &FilingMetadata) -> Self {
        Self {
            form_type: m.form_type.clone(),
            file_date: m.file_date.clone(),
            locator: m.locator.clone(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AifRecord {
    pub form_types: BTreeSet<String>,
    pub filing_count: usize,
    pub filings: Vec<FilingReference>,
}

/// Incremental form of `aggregate`, for callers that stream documents.
#[derive(Debug, Clone)]
pub struct Aggregator {
    retained: usize,
    documents: usize,
    records: BTreeMap<String, AifRecord>,
}

impl Default for Aggregator {
    fn default() -> Self {
        Self::new(DEFAULT_RETAINED_FILINGS)
    }
}

impl Aggregator {
    pub fn new(retained: usize) -> Self {
        Self {
            retained,
            documents: 0,
            records: BTreeMap::new(),
        }
    }

    /// Scan one document and fold its names in. Returns how many names it held.
    pub fn add_document(&mut self, reference: FilingReference, text: &str) -> usize {
        self.documents += 1;
        let names = extract_aif_names(text);
        for name in &names {
            let rec = self.records.entry(name.clone()).or_default();
            rec.form_types.insert(reference.form_type.clone());
            rec.filing_count += 1;
            if rec.filings.len() < self.retained {
                rec.filings.push(reference.clone());
            }
        }
        names.len()
    }

    pub fn documents_scanned(&self) -> usize {
        self.documents
    }

    pub fn finish(self) -> BTreeMap<String, AifRecord> {
        self.records
    }
}

/// Extract and merge names across `docs`. Output is sorted by name.
pub fn aggregate<'a, I>(docs: I, retained: usize) -> BTreeMap<String, AifRecord>
where
    I: IntoIterator<Item = &'a FetchedDocument>,
{
    let mut agg = Aggregator::new(retained);
    for doc in docs {
        agg.add_document(FilingReference::from(&doc.meta), &doc.text);
    }
    agg.finish()
}
