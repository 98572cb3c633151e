//! HTTP fetcher for the remote sales dataset.

use std::time::Duration;

use anyhow::{Context, Result, anyhow};
use petrol_core::RawRecord;
use reqwest::Client;
use tracing::info;

/// Fetches the raw JSON dataset over HTTP.
///
/// Cheap to clone — the inner [`reqwest::Client`] is `Arc`-based.
#[derive(Clone)]
pub struct Fetcher {
  client: Client,
}

impl Fetcher {
  pub fn new() -> Result<Self> {
    let client = Client::builder()
      .timeout(Duration::from_secs(30))
      .build()
      .context("failed to build HTTP client")?;
    Ok(Self { client })
  }

  /// `GET url` and decode the body as a JSON array of raw records.
  ///
  /// Any failure (network, non-2xx status, non-JSON body) is fatal; there
  /// are no retries.
  pub async fn fetch(&self, url: &str) -> Result<Vec<RawRecord>> {
    info!(url, "fetching sales dataset");

    let resp = self
      .client
      .get(url)
      .send()
      .await
      .with_context(|| format!("GET {url} failed"))?;

    if !resp.status().is_success() {
      return Err(anyhow!("GET {url} → {}", resp.status()));
    }

    let records: Vec<RawRecord> =
      resp.json().await.context("deserialising sales records")?;
    info!(records = records.len(), "dataset fetched");
    Ok(records)
  }
}
