// src/analyze/names.rs
//! Attorney-in-fact name extraction.
//!
//! Each appointment idiom is one row in `IDIOMS`: a regex template where
//! `{NAME}` expands to the person-name shape and `{AIF}` to the title phrase.
//! Every capture group of every match is a candidate; candidates go through
//! `is_likely_name` and the survivors are unioned into a set. Adding an idiom
//! means adding a row.
//!
//! Name shape: `First [M[.]] Last`, ASCII capitals, word-anchored. A middle
//! initial is kept and always rendered with a period ("Jane Q Smith" and
//! "Jane Q. Smith" both become "Jane Q. Smith"); runs of whitespace, line
//! breaks included, collapse to one space.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use std::collections::BTreeSet;

use crate::ingest::{normalize_document, prefix};

/// Only this many characters of a document are scanned.
pub const EXTRACT_PREFIX_CHARS: usize = 80_000;

const NAME: &str = r"(\b[A-Z][a-z]{1,20}\s+(?:[A-Z]\.?\s+)?[A-Z][a-z]{1,20}\b)";
const AIF: &str = r"(?i:attorney[- ]in[- ]fact)";

/// Appointment idioms recognized in filings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Idiom {
    /// "appoints X [and Y] ... attorney-in-fact"
    Appoints,
    /// "by X, attorney-in-fact"
    SignedBy,
    /// "X, Attorney-in-Fact"
    TitleAfterName,
    /// "Power of Attorney ... appoints X"
    PowerOfAttorney,
}

struct IdiomPattern {
    idiom: Idiom,
    template: &'static str,
}

const IDIOMS: &[IdiomPattern] = &[
    IdiomPattern {
        idiom: Idiom::Appoints,
        template: r"(?s)\b(?i:appoints?)\s+{NAME}(?:\s+and\s+{NAME})?.*?{AIF}",
    },
    IdiomPattern {
        idiom: Idiom::SignedBy,
        template: r"\b(?i:by)\s+{NAME}\s*,?\s*(?:as\s+)?{AIF}",
    },
    IdiomPattern {
        idiom: Idiom::TitleAfterName,
        template: r"{NAME}\s*,?\s*{AIF}",
    },
    IdiomPattern {
        idiom: Idiom::PowerOfAttorney,
        template: r"(?s)(?i:power\s+of\s+attorney).*?\b(?i:appoints?)\s+{NAME}",
    },
];

static COMPILED: Lazy<Vec<(Idiom, Regex)>> = Lazy::new(|| {
    IDIOMS
        .iter()
        .map(|p| {
            let src = p.template.replace("{NAME}", NAME).replace("{AIF}", AIF);
            (p.idiom, Regex::new(&src).expect("idiom pattern compiles"))
        })
        .collect()
});

/// Every idiom needs one of these phrases somewhere in the text.
static ANY_AIF: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)attorney[- ]in[- ]fact|power\s+of\s+attorney").expect("aif phrase compiles")
});

const STOPWORDS: &[&str] = &[
    "the", "and", "for", "with", "from", "that", "this", "which", "their", "each", "such",
    "full", "true", "lawful", "any", "all", "not", "but", "his", "her", "its", "our", "who",
    "may", "shall", "will", "can", "has", "had", "have", "been", "was", "were", "are", "does",
    "did", "act", "behalf", "independent", "without", "upon", "into", "also", "pursuant",
    "respect", "hereof", "thereof", "hereby",
];

/// Canonical spelling of a captured span: single spaces, initials with a period.
pub fn canonical_name(raw: &str) -> String {
    raw.split_whitespace()
        .map(|w| {
            let mut chars = w.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) if c.is_ascii_uppercase() => format!("{c}."),
                _ => w.to_string(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Person-name filter. Prefers missing a real name over accepting a phrase.
pub fn is_likely_name(text: &str) -> bool {
    let parts: Vec<&str> = text.split_whitespace().collect();
    if parts.len() < 2 {
        return false;
    }
    if text.chars().any(|c| c.is_ascii_digit()) {
        return false;
    }
    parts.iter().all(|p| {
        p.chars().next().is_some_and(char::is_uppercase)
            && p.chars().count() >= 2
            && !STOPWORDS.contains(&p.to_lowercase().as_str())
    })
}

/// Names appearing in an attorney-in-fact idiom anywhere in `text`.
pub fn extract_aif_names(text: &str) -> BTreeSet<String> {
    extract_with_idioms(text)
        .into_iter()
        .map(|(_, name)| name)
        .collect()
}

/// Every (idiom, name) hit in `text`, in idiom-table order.
/// A name caught by several idioms appears once per idiom.
pub fn extract_with_idioms(text: &str) -> Vec<(Idiom, String)> {
    let text = normalize_document(prefix(text, EXTRACT_PREFIX_CHARS));
    let mut out: Vec<(Idiom, String)> = Vec::new();
    if !ANY_AIF.is_match(&text) {
        return out;
    }
    for (idiom, re) in COMPILED.iter() {
        for caps in re.captures_iter(&text) {
            for group in caps.iter().skip(1).flatten() {
                let name = canonical_name(group.as_str());
                if is_likely_name(&name) && !out.iter().any(|(i, n)| i == idiom && *n == name) {
                    out.push((*idiom, name));
                }
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(names: &[&str]) -> BTreeSet<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn appoints_with_middle_initial() {
        let out = extract_aif_names("The Company appoints Jane Q. Smith as attorney-in-fact");
        assert_eq!(out, set(&["Jane Q. Smith"]));
    }

    #[test]
    fn bare_initial_is_canonicalized() {
        let out = extract_aif_names("hereby appoints Jane Q Smith, as my true attorney in fact");
        assert_eq!(out, set(&["Jane Q. Smith"]));
    }

    #[test]
    fn appoints_two_names() {
        let out = extract_aif_names(
            "The undersigned hereby appoints Mary Jones and Robert Lee, each acting singly, \
             as the undersigned's true and lawful Attorney-in-Fact",
        );
        assert_eq!(out, set(&["Mary Jones", "Robert Lee"]));
    }

    #[test]
    fn signed_by_block_across_lines() {
        let out = extract_aif_names("/s/ Signature\nBy Carlos Mendez,\nAttorney-in-Fact\n");
        assert!(out.contains("Carlos Mendez"));
    }

    #[test]
    fn title_after_name() {
        let out = extract_aif_names("/s/ Priya Raman, Attorney-In-Fact for John Doe");
        assert_eq!(out, set(&["Priya Raman"]));
    }

    #[test]
    fn power_of_attorney_then_appoints() {
        let out = extract_aif_names(
            "POWER OF ATTORNEY\nKnow all by these presents that the undersigned \
             constitutes and appoints Helen Park to sign Forms 3, 4 and 5. attorney-in-fact",
        );
        assert!(out.contains("Helen Park"));
    }

    #[test]
    fn html_markup_does_not_hide_signature() {
        let out = extract_aif_names("<td>/s/ Omar&nbsp;Haddad</td><td>, Attorney-in-Fact</td>");
        assert_eq!(out, set(&["Omar Haddad"]));
    }

    #[test]
    fn no_idiom_no_names() {
        assert!(extract_aif_names("Jane Smith signed the annual report as CEO.").is_empty());
        assert!(extract_aif_names("").is_empty());
    }

    #[test]
    fn stopwords_and_digits_rejected() {
        assert!(!is_likely_name("The Company"));
        assert!(!is_likely_name("Hereby Appoint"));
        assert!(!is_likely_name("Jane Smith2"));
        assert!(!is_likely_name("Jane"));
        assert!(!is_likely_name("jane Smith"));
        assert!(is_likely_name("Jane Q. Smith"));
    }

    #[test]
    fn shaped_phrase_with_stopword_is_filtered() {
        // "Such Person" fits the name shape; the stopword filter drops it.
        let out = extract_aif_names("acting by Such Person, attorney-in-fact");
        assert!(out.is_empty());
    }

    #[test]
    fn name_is_word_anchored() {
        let out = extract_aif_names("signed McDonald Smith, Attorney-in-Fact");
        assert!(!out.contains("Donald Smith"));
    }

    #[test]
    fn idioms_are_reported() {
        let hits = extract_with_idioms("By Ana Lopez, Attorney-in-Fact");
        assert!(hits.contains(&(Idiom::SignedBy, "Ana Lopez".to_string())));
        assert!(hits.contains(&(Idiom::TitleAfterName, "Ana Lopez".to_string())));
    }

    #[test]
    fn name_set_is_the_union_of_idiom_hits() {
        let text = "POWER OF ATTORNEY. The undersigned appoints Helen Park and Omar Haddad \
                    as attorney-in-fact. /s/ Omar Haddad, Attorney-in-Fact";
        let from_idioms: BTreeSet<String> =
            extract_with_idioms(text).into_iter().map(|(_, n)| n).collect();
        assert_eq!(extract_aif_names(text), from_idioms);
        assert_eq!(from_idioms, set(&["Helen Park", "Omar Haddad"]));
    }

    #[test]
    fn canonical_name_collapses_whitespace() {
        assert_eq!(canonical_name("Jane\n  Q   Smith"), "Jane Q. Smith");
        assert_eq!(canonical_name("Jane Q. Smith"), "Jane Q. Smith");
    }
}
