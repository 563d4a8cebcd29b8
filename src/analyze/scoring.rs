//! Composite governance-risk index.
//!
//! Four signals in [0,1] are combined as a weighted geometric mean:
//!
//!   index = gap^0.35 * valuation^0.25 * exodus^0.25 * void^0.15
//!
//! Each signal is floored at 0.01 before exponentiation so a missing reading
//! drags the index down without zeroing it. A high index needs every signal
//! to be non-trivial at once. The index is rounded to 4 decimals and mapped
//! onto five tiers with inclusive upper bounds.

use serde::{Deserialize, Serialize};

pub const W_SIGNATURE_GAP: f64 = 0.35;
pub const W_VALUATION_SPIKE: f64 = 0.25;
pub const W_INSIDER_EXODUS: f64 = 0.25;
pub const W_METADATA_VOID: f64 = 0.15;

/// Floor applied to every signal at combination time only.
pub const SIGNAL_FLOOR: f64 = 0.01;

pub const METHODOLOGY: &str = "Weighted geometric mean: \
SignatureGap^0.35 x ValuationSpike^0.25 x InsiderExodus^0.25 x MetadataVoid^0.15, \
each signal floored at 0.01. A near-zero signal anchors the index.";

/// Valuation reading. `Unavailable` is "no data", not "no detachment from trend".
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", content = "score", rename_all = "snake_case")]
pub enum ValuationReading {
    #[default]
    Unavailable,
    Measured(f64),
}

impl ValuationReading {
    /// Numeric value used by the index; `Unavailable` counts as zero (then floored).
    pub fn score(&self) -> f64 {
        match self {
            Self::Unavailable => 0.0,
            Self::Measured(x) => *x,
        }
    }

    pub fn is_available(&self) -> bool {
        matches!(self, Self::Measured(_))
    }
}

/// The four signals of one company scan.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Signals {
    pub signature_gap: f64,
    pub valuation_spike: ValuationReading,
    pub insider_exodus: f64,
    pub metadata_void: f64,
}

impl Signals {
    /// Convenience for callers holding four plain numbers.
    pub fn new(gap: f64, valuation: f64, exodus: f64, void: f64) -> Self {
        Self {
            signature_gap: gap,
            valuation_spike: ValuationReading::Measured(valuation),
            insider_exodus: exodus,
            metadata_void: void,
        }
    }
}

/// Weighted geometric mean of the four signals, rounded to 4 decimals.
pub fn combine(signals: &Signals) -> f64 {
    let terms = [
        (signals.signature_gap, W_SIGNATURE_GAP),
        (signals.valuation_spike.score(), W_VALUATION_SPIKE),
        (signals.insider_exodus, W_INSIDER_EXODUS),
        (signals.metadata_void, W_METADATA_VOID),
    ];
    let index = terms
        .iter()
        .map(|(x, w)| floor_signal(*x).powf(*w))
        .product::<f64>();
    round_to(index, 4)
}

/// NaN counts as missing data.
fn floor_signal(x: f64) -> f64 {
    if x.is_nan() {
        SIGNAL_FLOOR
    } else {
        x.max(SIGNAL_FLOOR)
    }
}

pub(crate) fn round_to(x: f64, decimals: i32) -> f64 {
    let f = 10f64.powi(decimals);
    (x * f).round() / f
}

/// Ordered risk tiers over the index.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RiskTier {
    Clear,
    Watch,
    Warn,
    Alert,
    Critical,
}

/// (inclusive upper bound, tier)
const TIER_BOUNDS: [(f64, RiskTier); 4] = [
    (0.2, RiskTier::Clear),
    (0.4, RiskTier::Watch),
    (0.6, RiskTier::Warn),
    (0.8, RiskTier::Alert),
];

impl RiskTier {
    pub const ALL: [RiskTier; 5] = [
        RiskTier::Clear,
        RiskTier::Watch,
        RiskTier::Warn,
        RiskTier::Alert,
        RiskTier::Critical,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Self::Clear => "CLEAR",
            Self::Watch => "WATCH",
            Self::Warn => "WARN",
            Self::Alert => "ALERT",
            Self::Critical => "CRITICAL",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::Clear => "Normal governance, normal markets.",
            Self::Watch => "Frankenstein detected. Worth a Google search.",
            Self::Warn => "Multiple stress signals. Worth an afternoon.",
            Self::Alert => "Anderson would have started flying drones.",
            Self::Critical => "The Hindenburg is already burning. Look up.",
        }
    }
}

impl std::fmt::Display for RiskTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Total: anything above 0.8 (NaN included) is CRITICAL.
pub fn classify(index: f64) -> RiskTier {
    TIER_BOUNDS
        .iter()
        .find(|(bound, _)| index <= *bound)
        .map(|(_, tier)| *tier)
        .unwrap_or(RiskTier::Critical)
}
