//! HTTP surface: AIF scans and index runs over the same engine the CLI uses.

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use chrono::NaiveDate;
use metrics_exporter_prometheus::PrometheusHandle;
use serde::Deserialize;
use tower_http::cors::CorsLayer;

use crate::config::ScanConfig;
use crate::engine::{self, IndexRequest};
use crate::ingest::types::DocumentFetcher;
use crate::metrics::Metrics;
use crate::report::{AifScan, IndexOutcome};

#[derive(Clone)]
pub struct AppState {
    pub fetcher: Arc<dyn DocumentFetcher>,
    pub config: Arc<ScanConfig>,
    /// Pin "today" (tests); `None` reads the clock per request.
    pub today: Option<NaiveDate>,
    pub metrics: Option<PrometheusHandle>,
}

impl AppState {
    pub fn new(fetcher: Arc<dyn DocumentFetcher>, config: ScanConfig) -> Self {
        Self {
            fetcher,
            config: Arc::new(config),
            today: None,
            metrics: None,
        }
    }

    fn today(&self) -> NaiveDate {
        self.today.unwrap_or_else(|| chrono::Utc::now().date_naive())
    }
}

pub fn router(state: AppState) -> Router {
    let mut r = Router::new()
        .route("/health", get(|| async { "ok" }))
        .route("/aif", get(aif_scan))
        .route("/index", get(index_run))
        .layer(CorsLayer::very_permissive())
        .with_state(state.clone());
    if let Some(h) = state.metrics {
        r = r.merge(Metrics::router(h));
    }
    r
}

#[derive(Debug, Deserialize)]
struct ScanQuery {
    company: Option<String>,
}

#[derive(Debug, Deserialize)]
struct IndexQuery {
    company: Option<String>,
    ticker: Option<String>,
    valuation: Option<f64>,
    price_ratio: Option<f64>,
    /// Comma-separated names; skips extraction when present.
    aifs: Option<String>,
}

type ApiError = (StatusCode, &'static str);

fn required_company(c: Option<String>) -> Result<String, ApiError> {
    c.map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .ok_or((StatusCode::BAD_REQUEST, "missing 'company' query parameter"))
}

async fn aif_scan(
    State(state): State<AppState>,
    Query(q): Query<ScanQuery>,
) -> Result<Json<AifScan>, ApiError> {
    let company = required_company(q.company)?;
    let scan = engine::scan_company(&*state.fetcher, &company, state.today(), &state.config).await;
    Ok(Json(scan))
}

async fn index_run(
    State(state): State<AppState>,
    Query(q): Query<IndexQuery>,
) -> Result<Json<IndexOutcome>, ApiError> {
    let company = required_company(q.company)?;
    let req = IndexRequest {
        company,
        ticker: q.ticker.filter(|t| !t.trim().is_empty()),
        aif_names: q
            .aifs
            .map(|s| s.split(',').map(|n| n.trim().to_string()).collect()),
        valuation_override: q.valuation,
        price_ratio: q.price_ratio,
    };
    let outcome = engine::run_index(&*state.fetcher, &req, state.today(), &state.config).await;
    Ok(Json(outcome))
}
