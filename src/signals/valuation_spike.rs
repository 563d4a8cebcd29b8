//! Valuation spike: price detachment from the 200-day moving average.
//!
//! No market-data provider is wired in. The operator supplies either a score
//! or the price / SMA200 ratio; without either the reading is `Unavailable`,
//! which the index treats as missing data rather than as "price on trend".

use crate::analyze::scoring::{round_to, ValuationReading};

/// Ratio at or below which there is no detachment.
const RATIO_FLOOR: f64 = 1.0;
/// Ratio at or above which detachment is maximal.
const RATIO_CEIL: f64 = 3.0;

/// Map price / SMA200 onto [0,1]: <=1.0 -> 0.0, >=3.0 -> 1.0, linear between.
pub fn valuation_from_ratio(ratio: f64) -> f64 {
    if !ratio.is_finite() || ratio <= RATIO_FLOOR {
        0.0
    } else if ratio >= RATIO_CEIL {
        1.0
    } else {
        round_to((ratio - RATIO_FLOOR) / (RATIO_CEIL - RATIO_FLOOR), 3)
    }
}

/// An explicit score wins over a ratio; non-finite inputs count as absent.
pub fn measure_valuation_spike(
    ticker: Option<&str>,
    override_score: Option<f64>,
    price_ratio: Option<f64>,
) -> ValuationReading {
    if let Some(x) = override_score.filter(|x| x.is_finite()) {
        return ValuationReading::Measured(x.clamp(0.0, 1.0));
    }
    match price_ratio.filter(|r| r.is_finite()) {
        Some(r) => ValuationReading::Measured(valuation_from_ratio(r)),
        None => {
            tracing::debug!(ticker = ticker.unwrap_or("-"), "valuation data unavailable");
            ValuationReading::Unavailable
        }
    }
}
