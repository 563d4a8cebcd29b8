// src/config/mod.rs
//! Scan configuration: look-back windows, sample sizes, text prefixes and the
//! search-index endpoints.
//!
//! Lookup order for `ScanConfig::load_default()`:
//! 1) `$AIF_SENTINEL_CONFIG` (must exist when set)
//! 2) `config/sentinel.toml`
//! 3) `config/sentinel.json`
//! 4) built-in defaults
//!
//! Every field is optional in the file; missing ones keep their defaults.

use anyhow::{anyhow, Context, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const ENV_CONFIG_PATH: &str = "AIF_SENTINEL_CONFIG";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScanConfig {
    pub aif_scan: AifScanConfig,
    pub signature_gap: SampleConfig,
    pub insider_exodus: SampleConfig,
    pub metadata_void: SampleConfig,
    pub edgar: EdgarConfig,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            aif_scan: AifScanConfig::default(),
            signature_gap: SampleConfig::signature_gap(),
            insider_exodus: SampleConfig::insider_exodus(),
            metadata_void: SampleConfig::metadata_void(),
            edgar: EdgarConfig::default(),
        }
    }
}

/// Settings for the company-wide attorney-in-fact sweep.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AifScanConfig {
    pub forms: Vec<String>,
    pub start_date: NaiveDate,
    pub max_per_form: usize,
    pub prefix_chars: usize,
    /// Filing references kept per name (the full count is tracked separately).
    pub retained_filings: usize,
}

impl Default for AifScanConfig {
    fn default() -> Self {
        Self {
            forms: ["3", "4", "5", "10-K", "10-Q", "8-K", "DEF 14A"]
                .into_iter()
                .map(String::from)
                .collect(),
            start_date: NaiveDate::from_ymd_opt(2022, 1, 1).unwrap_or_default(),
            max_per_form: 10,
            prefix_chars: 80_000,
            retained_filings: 5,
        }
    }
}

/// Sampling settings for one signal measurer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SampleConfig {
    pub forms: Vec<String>,
    pub lookback_days: i64,
    pub max_per_form: usize,
    pub prefix_chars: usize,
}

impl SampleConfig {
    pub fn signature_gap() -> Self {
        Self {
            forms: vec!["4".into(), "10-K".into()],
            lookback_days: 730,
            max_per_form: 15,
            prefix_chars: 60_000,
        }
    }

    pub fn insider_exodus() -> Self {
        Self {
            forms: vec!["4".into()],
            // 12 months of 30 days
            lookback_days: 12 * 30,
            max_per_form: 20,
            prefix_chars: 60_000,
        }
    }

    pub fn metadata_void() -> Self {
        Self {
            forms: vec!["10-K".into()],
            lookback_days: 730,
            max_per_form: 5,
            prefix_chars: 200_000,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EdgarConfig {
    pub search_url: String,
    pub archive_base: String,
    /// The archive rejects anonymous clients; include a contact address.
    pub user_agent: String,
    pub timeout_secs: u64,
}

impl Default for EdgarConfig {
    fn default() -> Self {
        Self {
            search_url: "https://efts.sec.gov/LATEST/search".into(),
            archive_base: "https://www.sec.gov/Archives".into(),
            user_agent: "aif-sentinel/0.1 research@example.org".into(),
            timeout_secs: 10,
        }
    }
}

impl ScanConfig {
    /// Load from an explicit path. Supports TOML or JSON (by extension, then by sniffing).
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("reading scan config from {}", path.display()))?;
        let ext = path
            .extension()
            .and_then(|s| s.to_str())
            .unwrap_or_default()
            .to_ascii_lowercase();
        parse_config(&content, ext.as_str())
    }

    pub fn load_default() -> Result<Self> {
        if let Ok(p) = std::env::var(ENV_CONFIG_PATH) {
            let pb = PathBuf::from(p);
            if pb.exists() {
                return Self::load_from(&pb);
            } else {
                return Err(anyhow!("{ENV_CONFIG_PATH} points to non-existent path"));
            }
        }
        let toml_p = PathBuf::from("config/sentinel.toml");
        if toml_p.exists() {
            return Self::load_from(&toml_p);
        }
        let json_p = PathBuf::from("config/sentinel.json");
        if json_p.exists() {
            return Self::load_from(&json_p);
        }
        Ok(Self::default())
    }
}

/// On-disk shape. Signal sections only override what they name; the rest
/// keeps that signal's own defaults.
#[derive(Deserialize)]
struct RawConfig {
    #[serde(default)]
    aif_scan: AifScanConfig,
    #[serde(default)]
    signature_gap: SampleOverrides,
    #[serde(default)]
    insider_exodus: SampleOverrides,
    #[serde(default)]
    metadata_void: SampleOverrides,
    #[serde(default)]
    edgar: EdgarConfig,
}

#[derive(Default, Deserialize)]
struct SampleOverrides {
    forms: Option<Vec<String>>,
    lookback_days: Option<i64>,
    max_per_form: Option<usize>,
    prefix_chars: Option<usize>,
}

impl SampleOverrides {
    fn apply(self, base: SampleConfig) -> SampleConfig {
        SampleConfig {
            forms: self.forms.unwrap_or(base.forms),
            lookback_days: self.lookback_days.unwrap_or(base.lookback_days),
            max_per_form: self.max_per_form.unwrap_or(base.max_per_form),
            prefix_chars: self.prefix_chars.unwrap_or(base.prefix_chars),
        }
    }
}

impl From<RawConfig> for ScanConfig {
    fn from(r: RawConfig) -> Self {
        Self {
            aif_scan: r.aif_scan,
            signature_gap: r.signature_gap.apply(SampleConfig::signature_gap()),
            insider_exodus: r.insider_exodus.apply(SampleConfig::insider_exodus()),
            metadata_void: r.metadata_void.apply(SampleConfig::metadata_void()),
            edgar: r.edgar,
        }
    }
}

fn parse_config(s: &str, hint_ext: &str) -> Result<ScanConfig> {
    if hint_ext == "json" || s.trim_start().starts_with('{') {
        let raw: RawConfig = serde_json::from_str(s).context("parsing scan config json")?;
        return Ok(raw.into());
    }
    let raw: RawConfig = toml::from_str(s).context("parsing scan config toml")?;
    Ok(raw.into())
}
