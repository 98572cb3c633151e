//! Raw input records and their normalized star-schema form.
//!
//! The remote dataset is a flat JSON array of denormalized entries. Ingestion
//! splits each entry into dimension rows (country, product) and a fact row
//! referencing them by surrogate key.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

// ─── Types ───────────────────────────────────────────────────────────────────

/// One denormalized entry of the remote JSON dataset. Consumed during
/// ingestion; never persisted in this shape.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawRecord {
  pub country:           String,
  pub petroleum_product: String,
  pub year:              i64,
  pub sale:              f64,
}

/// A fact-table row with both dimension names resolved to surrogate keys.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SaleRow {
  pub country_id: i64,
  pub product_id: i64,
  pub year:       i64,
  pub sales:      f64,
}

/// Name → surrogate-key mappings for both dimensions.
///
/// Holding a value of this type is proof that the dimension tables are
/// populated: fact rows can only be built through [`normalize`], which
/// requires one, so the dimension-before-fact ordering is enforced by the
/// types rather than by convention.
#[derive(Debug, Clone, Default)]
pub struct DimensionKeys {
  pub countries: HashMap<String, i64>,
  pub products:  HashMap<String, i64>,
}

// ─── Normalization ───────────────────────────────────────────────────────────

/// Distinct country and product names across `records`, sorted ascending so
/// dimension inserts happen in a deterministic order.
pub fn distinct_dimensions(records: &[RawRecord]) -> (Vec<String>, Vec<String>) {
  let mut countries: Vec<String> =
    records.iter().map(|r| r.country.clone()).collect();
  countries.sort();
  countries.dedup();

  let mut products: Vec<String> =
    records.iter().map(|r| r.petroleum_product.clone()).collect();
  products.sort();
  products.dedup();

  (countries, products)
}

/// Rewrite each raw record as a fact row by resolving its dimension names
/// through `keys`, preserving input order.
///
/// Fails on the first name absent from the mappings and returns nothing
/// partial, so a lookup failure aborts before any fact row is inserted.
/// Repeated raw entries produce repeated fact rows; nothing is deduplicated.
pub fn normalize(
  records: &[RawRecord],
  keys: &DimensionKeys,
) -> Result<Vec<SaleRow>> {
  records
    .iter()
    .map(|r| {
      let country_id = *keys
        .countries
        .get(&r.country)
        .ok_or_else(|| Error::UnknownCountry(r.country.clone()))?;
      let product_id = *keys
        .products
        .get(&r.petroleum_product)
        .ok_or_else(|| Error::UnknownProduct(r.petroleum_product.clone()))?;
      Ok(SaleRow { country_id, product_id, year: r.year, sales: r.sale })
    })
    .collect()
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
  use super::*;

  fn raw(country: &str, product: &str, year: i64, sale: f64) -> RawRecord {
    RawRecord {
      country:           country.into(),
      petroleum_product: product.into(),
      year,
      sale,
    }
  }

  fn keys_for(records: &[RawRecord]) -> DimensionKeys {
    let (countries, products) = distinct_dimensions(records);
    DimensionKeys {
      countries: countries
        .into_iter()
        .enumerate()
        .map(|(i, n)| (n, i as i64 + 1))
        .collect(),
      products:  products
        .into_iter()
        .enumerate()
        .map(|(i, n)| (n, i as i64 + 1))
        .collect(),
    }
  }

  #[test]
  fn distinct_dimensions_sorted_and_deduped() {
    let records = vec![
      raw("Nepal", "Diesel", 2000, 1.0),
      raw("India", "Petrol", 2001, 2.0),
      raw("Nepal", "Diesel", 2002, 3.0),
    ];

    let (countries, products) = distinct_dimensions(&records);
    assert_eq!(countries, vec!["India".to_owned(), "Nepal".to_owned()]);
    assert_eq!(products, vec!["Diesel".to_owned(), "Petrol".to_owned()]);
  }

  #[test]
  fn normalize_covers_every_record() {
    let records = vec![
      raw("Nepal", "Diesel", 2000, 1.5),
      raw("India", "Petrol", 2001, 2.5),
      raw("Nepal", "Petrol", 2000, 0.0),
    ];
    let keys = keys_for(&records);

    let rows = normalize(&records, &keys).unwrap();
    assert_eq!(rows.len(), records.len());

    // Input order is preserved and names resolve to the mapped keys.
    assert_eq!(rows[0].country_id, keys.countries["Nepal"]);
    assert_eq!(rows[0].product_id, keys.products["Diesel"]);
    assert_eq!(rows[0].year, 2000);
    assert_eq!(rows[0].sales, 1.5);
    assert_eq!(rows[2].sales, 0.0);
  }

  #[test]
  fn normalize_unknown_country_errors() {
    let records = vec![raw("Atlantis", "Diesel", 2000, 1.0)];
    let mut keys = keys_for(&records);
    keys.countries.clear();

    let err = normalize(&records, &keys).unwrap_err();
    assert_eq!(err, Error::UnknownCountry("Atlantis".into()));
  }

  #[test]
  fn normalize_unknown_product_errors() {
    let records = vec![raw("Nepal", "Naphtha", 2000, 1.0)];
    let mut keys = keys_for(&records);
    keys.products.clear();

    let err = normalize(&records, &keys).unwrap_err();
    assert_eq!(err, Error::UnknownProduct("Naphtha".into()));
  }

  #[test]
  fn raw_record_decodes_dataset_shape() {
    let json = r#"[
      {"country": "Nepal", "petroleum_product": "Diesel", "year": 2014, "sale": 924.64},
      {"country": "India", "petroleum_product": "Petrol", "year": 2015, "sale": 0}
    ]"#;

    let records: Vec<RawRecord> = serde_json::from_str(json).unwrap();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].country, "Nepal");
    assert_eq!(records[0].sale, 924.64);
    assert_eq!(records[1].year, 2015);
    assert_eq!(records[1].sale, 0.0);
  }
}
