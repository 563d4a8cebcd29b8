//! aif-sentinel: command-line entrypoint.
//! Scans a company's filings for attorney-in-fact signatories, computes the
//! composite governance-risk index, or serves both over HTTP.
//!
//! JSON results go to stdout; logs and the human summary go to stderr.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use aif_sentinel::analyze::extract_with_idioms;
use aif_sentinel::api::{self, AppState};
use aif_sentinel::engine::{self, IndexRequest};
use aif_sentinel::ingest::providers::{edgar::EdgarClient, fixture::FixtureFetcher};
use aif_sentinel::metrics::Metrics;
use aif_sentinel::{DocumentFetcher, IndexOutcome, ScanConfig};

#[derive(Debug, Parser)]
#[command(name = "aif-sentinel", version, about = "Attorney-in-fact extraction and governance-risk index")]
struct Cli {
    /// Scan configuration file (TOML or JSON). Defaults to $AIF_SENTINEL_CONFIG or config/sentinel.*.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Read filings from a local JSON fixture instead of the search index.
    #[arg(long, global = true)]
    fixtures: Option<PathBuf>,

    /// Emit logs as JSON lines.
    #[arg(long, global = true)]
    json_logs: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Extract every attorney-in-fact name from a company's filings.
    Scan {
        /// Company name as it appears in filings.
        #[arg(required = true, num_args = 1..)]
        company: Vec<String>,
    },
    /// Compute the composite governance-risk index.
    Index {
        #[arg(required = true, num_args = 1..)]
        company: Vec<String>,
        /// Ticker symbol (reported only; no market data is fetched).
        #[arg(long)]
        ticker: Option<String>,
        /// Comma-separated AIF names; skips extraction.
        #[arg(long, value_delimiter = ',')]
        aifs: Option<Vec<String>>,
        /// Externally computed valuation-spike score in [0,1].
        #[arg(long)]
        valuation: Option<f64>,
        /// Last price divided by its 200-day moving average; ignored with --valuation.
        #[arg(long)]
        price_ratio: Option<f64>,
    },
    /// Print the attorney-in-fact names found in one local document.
    Extract { file: PathBuf },
    /// Serve the HTTP API.
    Serve {
        #[arg(long, default_value_t = 8080)]
        port: u16,
    },
}

fn init_tracing(json: bool) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("aif_sentinel=info,warn"));
    let registry = tracing_subscriber::registry().with(filter);
    if json {
        registry.with(fmt::layer().json().with_writer(std::io::stderr)).init();
    } else {
        registry
            .with(fmt::layer().compact().with_writer(std::io::stderr))
            .init();
    }
}

fn load_config(path: Option<&Path>) -> Result<ScanConfig> {
    match path {
        Some(p) => ScanConfig::load_from(p),
        None => ScanConfig::load_default(),
    }
}

fn build_fetcher(fixtures: Option<&Path>, cfg: &ScanConfig) -> Result<Arc<dyn DocumentFetcher>> {
    let fetcher: Arc<dyn DocumentFetcher> = match fixtures {
        Some(p) => Arc::new(FixtureFetcher::from_json_file(p)?),
        None => Arc::new(EdgarClient::new(&cfg.edgar)?),
    };
    Ok(fetcher)
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env in local/dev; no-op when absent.
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    init_tracing(cli.json_logs);

    let cfg = load_config(cli.config.as_deref())?;
    let today = chrono::Utc::now().date_naive();

    match cli.command {
        Command::Scan { company } => {
            let company = company.join(" ");
            let fetcher = build_fetcher(cli.fixtures.as_deref(), &cfg)?;
            let scan = engine::scan_company(&*fetcher, &company, today, &cfg).await;
            print_json(&scan)?;
            eprintln!(
                "Found {} attorney(s)-in-fact across {} filings for {}.",
                scan.aif_count, scan.total_filings_scanned, scan.company
            );
            eprintln!("{}", scan.instruction);
        }
        Command::Index {
            company,
            ticker,
            aifs,
            valuation,
            price_ratio,
        } => {
            let req = IndexRequest {
                company: company.join(" "),
                ticker,
                aif_names: aifs,
                valuation_override: valuation,
                price_ratio,
            };
            let fetcher = build_fetcher(cli.fixtures.as_deref(), &cfg)?;
            let outcome = engine::run_index(&*fetcher, &req, today, &cfg).await;
            print_json(&outcome)?;
            match &outcome {
                IndexOutcome::NoAifDetected { company } => {
                    eprintln!("No attorney-in-fact found for {company}; index not computed.");
                }
                IndexOutcome::Scored(r) => {
                    eprintln!("Composite index: {:.4}", r.index);
                    eprintln!("Risk tier:       {} ({})", r.risk_tier, r.risk_description);
                }
            }
        }
        Command::Extract { file } => {
            let text = std::fs::read_to_string(&file)
                .with_context(|| format!("reading {}", file.display()))?;
            print_json(&extract_with_idioms(&text))?;
        }
        Command::Serve { port } => {
            let fetcher = build_fetcher(cli.fixtures.as_deref(), &cfg)?;
            let mut state = AppState::new(fetcher, cfg);
            match Metrics::init() {
                Ok(m) => state.metrics = Some(m.handle),
                Err(e) => tracing::warn!(error = ?e, "metrics disabled"),
            }
            let addr = std::net::SocketAddr::from(([0, 0, 0, 0], port));
            let listener = tokio::net::TcpListener::bind(addr)
                .await
                .with_context(|| format!("binding {addr}"))?;
            tracing::info!(%addr, "listening");
            axum::serve(listener, api::router(state))
                .await
                .context("http server")?;
        }
    }
    Ok(())
}
