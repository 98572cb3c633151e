//! The `SalesStore` trait and the aggregate row types it returns.
//!
//! The trait is implemented by storage backends (e.g.
//! `petrol-store-sqlite`). The binary depends on this abstraction, not on
//! any concrete backend.

use std::future::Future;

use crate::record::{DimensionKeys, SaleRow};

// ─── Aggregate rows ──────────────────────────────────────────────────────────

/// Direction of the country ranking in the top/bottom report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rank {
  Highest,
  Lowest,
}

/// A product with its summed sales.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductTotal {
  pub product: String,
  pub total:   f64,
}

/// A country with its summed sales.
#[derive(Debug, Clone, PartialEq)]
pub struct CountryTotal {
  pub country: String,
  pub total:   f64,
}

/// One fact row joined back to its product name. Returned in fact insertion
/// order, which [`crate::report::bucket_averages`] relies on for its
/// last-write-wins semantics.
#[derive(Debug, Clone, PartialEq)]
pub struct YearlySale {
  pub year:    i64,
  pub product: String,
  pub sales:   f64,
}

// ─── Trait ───────────────────────────────────────────────────────────────────

/// Abstraction over the sales star-schema backend.
///
/// Writes happen in a fixed order: [`SalesStore::load_dimensions`] first,
/// then [`SalesStore::insert_sales`] with rows built from the returned
/// [`DimensionKeys`]. All report methods are read-only.
pub trait SalesStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  // ── Writes ────────────────────────────────────────────────────────────

  /// Upsert the given dimension names and return the full name →
  /// surrogate-key mappings, re-read from the tables after insertion.
  ///
  /// Every input name has an entry in the returned mappings. Names already
  /// present keep their existing key, so repeated ingestion does not
  /// duplicate dimension rows.
  fn load_dimensions(
    &self,
    countries: Vec<String>,
    products: Vec<String>,
  ) -> impl Future<Output = Result<DimensionKeys, Self::Error>> + Send + '_;

  /// Bulk-insert fact rows inside a single transaction and return the
  /// inserted count. A failed batch commits nothing.
  fn insert_sales(
    &self,
    rows: Vec<SaleRow>,
  ) -> impl Future<Output = Result<usize, Self::Error>> + Send + '_;

  // ── Reads ─────────────────────────────────────────────────────────────

  /// Total sales per product, descending by total. Ties broken by
  /// ascending product name.
  fn product_totals(
    &self,
  ) -> impl Future<Output = Result<Vec<ProductTotal>, Self::Error>> + Send + '_;

  /// The `limit` countries with the highest or lowest total sales.
  /// Ordered descending for [`Rank::Highest`], ascending for
  /// [`Rank::Lowest`]; ties broken by ascending country name. Returns
  /// `min(limit, distinct countries)` rows.
  fn country_totals(
    &self,
    rank: Rank,
    limit: u32,
  ) -> impl Future<Output = Result<Vec<CountryTotal>, Self::Error>> + Send + '_;

  /// Every fact row with its product name, in insertion order.
  fn yearly_sales(
    &self,
  ) -> impl Future<Output = Result<Vec<YearlySale>, Self::Error>> + Send + '_;

  /// Number of fact rows currently stored.
  fn fact_count(
    &self,
  ) -> impl Future<Output = Result<u64, Self::Error>> + Send + '_;
}
