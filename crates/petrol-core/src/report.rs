//! Aggregate report computation and plain-text rendering.
//!
//! Reports (a) and (b) — totals per product and top/bottom countries — are
//! computed in SQL by the store. This module owns the bucketed multi-year
//! average (report (c)) and the text layout of all three sections.

use std::collections::BTreeMap;

use crate::store::{CountryTotal, ProductTotal, YearlySale};

/// Years per averaging bucket.
pub const BUCKET_YEARS: i64 = 4;

/// Shared two-column header for the totals reports. The original report
/// prints this header for the per-product section too.
const TOTALS_HEADER: &str = "country    total sales";

const BUCKET_HEADER: &str = "year       product            avg";

// ─── Bucketed averages ───────────────────────────────────────────────────────

/// One row of the bucketed-average report.
#[derive(Debug, Clone, PartialEq)]
pub struct BucketAverage {
  /// First year of the bucket.
  pub start_year: i64,
  pub product:    String,
  pub average:    f64,
}

impl BucketAverage {
  /// Fixed-width label: always `start`–`start + 3`, even when the trailing
  /// bucket holds fewer than four distinct years.
  pub fn label(&self) -> String {
    format!("{}-{}", self.start_year, self.start_year + BUCKET_YEARS - 1)
  }
}

/// Average each product's per-year sales over consecutive 4-year buckets.
///
/// The distinct years present in `rows` are sorted ascending and split into
/// chunks of four (the last chunk may be shorter). Per (year, product) a
/// single value is retained — the last row in input order wins, values are
/// not summed. Values of exactly zero are skipped. A (bucket, product) pair
/// that retains no values is omitted entirely, so no average is ever taken
/// over an empty set.
///
/// Output is ordered by bucket start year, then product name.
pub fn bucket_averages(rows: &[YearlySale]) -> Vec<BucketAverage> {
  // year → product → retained sales value (later rows overwrite earlier).
  let mut by_year: BTreeMap<i64, BTreeMap<&str, f64>> = BTreeMap::new();
  for row in rows {
    by_year
      .entry(row.year)
      .or_default()
      .insert(row.product.as_str(), row.sales);
  }

  let years: Vec<i64> = by_year.keys().copied().collect();

  let mut out = Vec::new();
  for chunk in years.chunks(BUCKET_YEARS as usize) {
    let start_year = chunk[0];

    let mut retained: BTreeMap<&str, Vec<f64>> = BTreeMap::new();
    for year in chunk {
      for (product, value) in &by_year[year] {
        if *value != 0.0 {
          retained.entry(*product).or_default().push(*value);
        }
      }
    }

    for (product, values) in retained {
      let average = values.iter().sum::<f64>() / values.len() as f64;
      out.push(BucketAverage { start_year, product: product.to_owned(), average });
    }
  }
  out
}

// ─── Rendering ───────────────────────────────────────────────────────────────

/// Whole amounts keep a trailing decimal (`30.0`, not `30`).
fn fmt_amount(v: f64) -> String {
  if v.fract() == 0.0 { format!("{v:.1}") } else { v.to_string() }
}

/// Report (a): total sales per product, descending.
pub fn render_product_totals(rows: &[ProductTotal]) -> String {
  let mut out = String::from("total sale of each petroleum product\n");
  out.push_str(TOTALS_HEADER);
  out.push('\n');
  for row in rows {
    out.push_str(&format!("{}    {}\n", row.product, fmt_amount(row.total)));
  }
  out
}

/// Report (b): top-3 and bottom-3 countries by total sales.
pub fn render_country_totals(
  highest: &[CountryTotal],
  lowest: &[CountryTotal],
) -> String {
  let mut out = String::new();
  for (title, rows) in [
    ("top 3 countries that have the highest sales", highest),
    ("top 3 countries that have the lowest sales", lowest),
  ] {
    out.push_str(title);
    out.push('\n');
    out.push_str(TOTALS_HEADER);
    out.push('\n');
    for row in rows {
      out.push_str(&format!("{}    {}\n", row.country, fmt_amount(row.total)));
    }
  }
  out
}

/// Report (c): bucketed multi-year averages per product.
pub fn render_bucket_averages(rows: &[BucketAverage]) -> String {
  let mut out = String::from(BUCKET_HEADER);
  out.push('\n');
  for row in rows {
    out.push_str(&format!(
      "{}  {}   {}\n",
      row.label(),
      row.product,
      fmt_amount(row.average)
    ));
  }
  out
}

// ─── Tests ───────────────────────────────────────────────────────────────────
