//! Integration tests for `SqliteStore` against an in-memory database.

use petrol_core::{
  DimensionKeys, RawRecord, distinct_dimensions, normalize,
  report::bucket_averages,
  store::{Rank, SalesStore},
};

use crate::SqliteStore;

async fn store() -> SqliteStore {
  SqliteStore::open_in_memory().await.expect("in-memory store")
}

fn raw(country: &str, product: &str, year: i64, sale: f64) -> RawRecord {
  RawRecord {
    country:           country.into(),
    petroleum_product: product.into(),
    year,
    sale,
  }
}

/// Run the full ingestion pipeline over `records` and return the mappings.
async fn ingest(s: &SqliteStore, records: &[RawRecord]) -> DimensionKeys {
  let (countries, products) = distinct_dimensions(records);
  let keys = s.load_dimensions(countries, products).await.unwrap();
  let rows = normalize(records, &keys).unwrap();
  s.insert_sales(rows).await.unwrap();
  keys
}

// ─── Dimensions ──────────────────────────────────────────────────────────────

#[tokio::test]
async fn load_dimensions_maps_every_name() {
  let s = store().await;
  let records = vec![
    raw("Nepal", "Diesel", 2000, 1.0),
    raw("India", "Petrol", 2001, 2.0),
    raw("Nepal", "Kerosene", 2002, 3.0),
  ];

  let keys = ingest(&s, &records).await;

  for r in &records {
    assert!(keys.countries.contains_key(&r.country));
    assert!(keys.products.contains_key(&r.petroleum_product));
  }
  assert_eq!(keys.countries.len(), 2);
  assert_eq!(keys.products.len(), 3);
}

#[tokio::test]
async fn ingest_twice_keeps_dimensions_unique() {
  let s = store().await;
  let records =
    vec![raw("Nepal", "Diesel", 2000, 1.0), raw("India", "Petrol", 2001, 2.0)];

  let first = ingest(&s, &records).await;
  let second = ingest(&s, &records).await;

  // Upsert semantics: same names, same surrogate keys, no duplicate rows.
  assert_eq!(first.countries, second.countries);
  assert_eq!(first.products, second.products);

  // Facts are never deduplicated, so the second run doubles them.
  assert_eq!(s.fact_count().await.unwrap(), 4);
}

// ─── Facts ───────────────────────────────────────────────────────────────────

#[tokio::test]
async fn fact_count_matches_raw_records() {
  let s = store().await;
  // Two identical raw entries stay two fact rows.
  let records = vec![
    raw("Nepal", "Diesel", 2000, 1.0),
    raw("Nepal", "Diesel", 2000, 1.0),
    raw("India", "Petrol", 2001, 2.0),
  ];

  ingest(&s, &records).await;
  assert_eq!(s.fact_count().await.unwrap(), 3);
}

#[tokio::test]
async fn yearly_sales_preserves_insertion_order() {
  let s = store().await;
  let records = vec![
    raw("Nepal", "Diesel", 2000, 5.0),
    raw("India", "Petrol", 2001, 7.0),
    raw("Nepal", "Diesel", 2000, 8.0),
  ];

  ingest(&s, &records).await;

  let rows = s.yearly_sales().await.unwrap();
  assert_eq!(rows.len(), 3);
  assert_eq!(rows[0].sales, 5.0);
  assert_eq!(rows[1].product, "Petrol");
  assert_eq!(rows[2].sales, 8.0);
}

// ─── Report (a): product totals ──────────────────────────────────────────────

#[tokio::test]
async fn product_totals_sum_and_order_descending() {
  let s = store().await;
  let records = vec![
    raw("Nepal", "Petrol", 2000, 5.0),
    raw("India", "Petrol", 2001, 7.5),
    raw("Nepal", "Diesel", 2000, 20.0),
    raw("India", "Kerosene", 2001, 1.0),
  ];

  ingest(&s, &records).await;

  let totals = s.product_totals().await.unwrap();
  assert_eq!(totals.len(), 3);
  assert_eq!(totals[0].product, "Diesel");
  assert_eq!(totals[0].total, 20.0);
  assert_eq!(totals[1].product, "Petrol");
  assert_eq!(totals[1].total, 12.5);
  assert_eq!(totals[2].product, "Kerosene");
}

#[tokio::test]
async fn product_totals_ties_break_by_name() {
  let s = store().await;
  let records =
    vec![raw("Nepal", "Petrol", 2000, 4.0), raw("Nepal", "Diesel", 2000, 4.0)];

  ingest(&s, &records).await;

  let totals = s.product_totals().await.unwrap();
  assert_eq!(totals[0].product, "Diesel");
  assert_eq!(totals[1].product, "Petrol");
}

// ─── Report (b): country rankings ────────────────────────────────────────────

#[tokio::test]
async fn country_totals_highest_and_lowest() {
  let s = store().await;
  let records = vec![
    raw("A", "Diesel", 2000, 1.0),
    raw("B", "Diesel", 2000, 2.0),
    raw("C", "Diesel", 2000, 3.0),
    raw("D", "Diesel", 2000, 4.0),
  ];

  ingest(&s, &records).await;

  let highest = s.country_totals(Rank::Highest, 3).await.unwrap();
  let names: Vec<&str> = highest.iter().map(|c| c.country.as_str()).collect();
  assert_eq!(names, vec!["D", "C", "B"]);

  let lowest = s.country_totals(Rank::Lowest, 3).await.unwrap();
  let names: Vec<&str> = lowest.iter().map(|c| c.country.as_str()).collect();
  assert_eq!(names, vec!["A", "B", "C"]);
}

#[tokio::test]
async fn country_totals_limit_clamps_to_distinct_count() {
  let s = store().await;
  let records =
    vec![raw("A", "Diesel", 2000, 1.0), raw("B", "Diesel", 2000, 2.0)];

  ingest(&s, &records).await;

  let highest = s.country_totals(Rank::Highest, 3).await.unwrap();
  assert_eq!(highest.len(), 2);
}

// ─── End to end ──────────────────────────────────────────────────────────────

#[tokio::test]
async fn end_to_end_two_record_scenario() {
  let s = store().await;
  let records =
    vec![raw("A", "X", 2000, 10.0), raw("B", "X", 2000, 20.0)];

  ingest(&s, &records).await;

  let totals = s.product_totals().await.unwrap();
  assert_eq!(totals.len(), 1);
  assert_eq!(totals[0].product, "X");
  assert_eq!(totals[0].total, 30.0);

  let highest = s.country_totals(Rank::Highest, 3).await.unwrap();
  assert_eq!(highest[0].country, "B");
  assert_eq!(highest[1].country, "A");

  let lowest = s.country_totals(Rank::Lowest, 3).await.unwrap();
  assert_eq!(lowest[0].country, "A");
  assert_eq!(lowest[1].country, "B");

  // Both rows share (year, product), so the bucket average keeps only the
  // later value rather than averaging across countries.
  let buckets = bucket_averages(&s.yearly_sales().await.unwrap());
  assert_eq!(buckets.len(), 1);
  assert_eq!(buckets[0].label(), "2000-2003");
  assert_eq!(buckets[0].product, "X");
  assert_eq!(buckets[0].average, 20.0);
}
