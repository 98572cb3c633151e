//! `petrol` — ingest the petroleum sales dataset and print its reports.
//!
//! Runs the full pipeline once and exits: fetch the remote JSON dataset,
//! normalize it into the star schema, bulk-load SQLite, then print the
//! three aggregate reports to stdout.
//!
//! # Usage
//!
//! ```
//! petrol
//! petrol --url https://example.com/data.json --db report.db
//! petrol --config ~/.config/petrol/config.toml
//! ```

mod fetch;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use fetch::Fetcher;
use petrol_core::{
  distinct_dimensions, normalize, report,
  store::{Rank, SalesStore},
};
use petrol_store_sqlite::SqliteStore;
use serde::Deserialize;
use tracing::info;

/// The dataset published with the original reporting exercise.
const DEFAULT_URL: &str = "https://raw.githubusercontent.com/younginnovations/internship-challenges/master/programming/petroleum-report/data.json";

const DEFAULT_DB: &str = "report.db";

// ─── CLI args ─────────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(name = "petrol", about = "Petroleum sales ingestion and reporting")]
struct Args {
  /// Path to a TOML config file (url, db).
  #[arg(short, long, value_name = "FILE")]
  config: Option<PathBuf>,

  /// Source URL of the JSON sales dataset.
  #[arg(long, env = "PETROL_URL")]
  url: Option<String>,

  /// Path of the SQLite database file (default: report.db).
  #[arg(long, env = "PETROL_DB")]
  db: Option<PathBuf>,
}

// ─── Config file ──────────────────────────────────────────────────────────────

/// Shape of the optional TOML config file.
#[derive(Deserialize, Default)]
struct ConfigFile {
  #[serde(default)]
  url: String,
  #[serde(default)]
  db:  String,
}

/// Resolved pipeline settings. Flags win over the config file; defaults
/// fill whatever is left.
#[derive(Debug, Clone)]
struct Config {
  url: String,
  db:  PathBuf,
}

fn resolve_config(args: Args) -> Result<Config> {
  let file: ConfigFile = match &args.config {
    Some(path) => {
      let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading config file {}", path.display()))?;
      toml::from_str(&text).context("parsing config file")?
    }
    None => ConfigFile::default(),
  };

  let url = match args.url {
    Some(url) => url,
    None if !file.url.is_empty() => file.url,
    None => DEFAULT_URL.to_owned(),
  };
  let db = match args.db {
    Some(db) => db,
    None if !file.db.is_empty() => file.db.into(),
    None => DEFAULT_DB.into(),
  };

  Ok(Config { url, db })
}

// ─── Pipeline ─────────────────────────────────────────────────────────────────

async fn run(config: Config) -> Result<()> {
  let records = Fetcher::new()?.fetch(&config.url).await?;

  let store = SqliteStore::open(&config.db)
    .await
    .with_context(|| format!("opening database {}", config.db.display()))?;

  // Dimensions first: fact rows can only be built from the returned keys.
  let (countries, products) = distinct_dimensions(&records);
  let keys = store.load_dimensions(countries, products).await?;
  let rows = normalize(&records, &keys)?;
  let inserted = store.insert_sales(rows).await?;
  info!(inserted, "sales facts loaded");

  let product_totals = store.product_totals().await?;
  let highest = store.country_totals(Rank::Highest, 3).await?;
  let lowest = store.country_totals(Rank::Lowest, 3).await?;
  let buckets = report::bucket_averages(&store.yearly_sales().await?);

  print!("{}", report::render_product_totals(&product_totals));
  print!("{}", report::render_country_totals(&highest, &lowest));
  print!("{}", report::render_bucket_averages(&buckets));

  Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
  tracing_subscriber::fmt()
    .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
    .init();

  let config = resolve_config(Args::parse())?;
  run(config).await
}
