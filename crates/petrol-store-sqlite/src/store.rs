//! [`SqliteStore`] — the SQLite implementation of [`SalesStore`].

use std::path::Path;

use petrol_core::{
  record::{DimensionKeys, SaleRow},
  store::{CountryTotal, ProductTotal, Rank, SalesStore, YearlySale},
};
use tracing::debug;

use crate::{Error, Result, schema::SCHEMA};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A petrol sales store backed by a single SQLite file.
///
/// Cloning is cheap — the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store — useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    debug!("creating tables");
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    debug!("table creation complete");
    Ok(())
  }
}

// ─── SalesStore impl ─────────────────────────────────────────────────────────

impl SalesStore for SqliteStore {
  type Error = Error;

  // ── Writes ────────────────────────────────────────────────────────────────

  async fn load_dimensions(
    &self,
    countries: Vec<String>,
    products: Vec<String>,
  ) -> Result<DimensionKeys> {
    debug!(
      countries = countries.len(),
      products = products.len(),
      "loading dimension tables"
    );

    let keys = self
      .conn
      .call(move |conn| {
        {
          let mut stmt = conn.prepare(
            "INSERT INTO country (country_name) VALUES (?1)
             ON CONFLICT(country_name) DO NOTHING",
          )?;
          for name in &countries {
            stmt.execute(rusqlite::params![name])?;
          }
        }
        {
          let mut stmt = conn.prepare(
            "INSERT INTO petroleum_product (product_name) VALUES (?1)
             ON CONFLICT(product_name) DO NOTHING",
          )?;
          for name in &products {
            stmt.execute(rusqlite::params![name])?;
          }
        }

        // Re-read the full tables so names inserted by earlier runs map to
        // their existing keys.
        let mut keys = DimensionKeys::default();

        let mut stmt = conn.prepare("SELECT id, country_name FROM country")?;
        let rows = stmt.query_map([], |row| {
          Ok((row.get::<_, i64>(0)?, row.get::<_, String>(1)?))
        })?;
        for row in rows {
          let (id, name) = row?;
          keys.countries.insert(name, id);
        }

        let mut stmt =
          conn.prepare("SELECT id, product_name FROM petroleum_product")?;
        let rows = stmt.query_map([], |row| {
          Ok((row.get::<_, i64>(0)?, row.get::<_, String>(1)?))
        })?;
        for row in rows {
          let (id, name) = row?;
          keys.products.insert(name, id);
        }

        Ok(keys)
      })
      .await?;

    Ok(keys)
  }

  async fn insert_sales(&self, rows: Vec<SaleRow>) -> Result<usize> {
    debug!(rows = rows.len(), "bulk-inserting sales facts");

    let inserted = self
      .conn
      .call(move |conn| {
        // Single transaction: a failed batch commits nothing.
        let tx = conn.transaction()?;
        {
          let mut stmt = tx.prepare(
            "INSERT INTO petroleum_sales (country_id, product_id, year, sales)
             VALUES (?1, ?2, ?3, ?4)",
          )?;
          for row in &rows {
            stmt.execute(rusqlite::params![
              row.country_id,
              row.product_id,
              row.year,
              row.sales,
            ])?;
          }
        }
        tx.commit()?;
        Ok(rows.len())
      })
      .await?;

    Ok(inserted)
  }

  // ── Reads ─────────────────────────────────────────────────────────────────

  async fn product_totals(&self) -> Result<Vec<ProductTotal>> {
    let rows = self
      .conn
      .call(|conn| {
        let mut stmt = conn.prepare(
          "SELECT p.product_name, SUM(s.sales) AS total_sales
           FROM petroleum_sales s
           JOIN petroleum_product p ON p.id = s.product_id
           GROUP BY p.product_name
           ORDER BY total_sales DESC, p.product_name ASC",
        )?;
        let rows = stmt
          .query_map([], |row| {
            Ok(ProductTotal { product: row.get(0)?, total: row.get(1)? })
          })?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    Ok(rows)
  }

  async fn country_totals(
    &self,
    rank: Rank,
    limit: u32,
  ) -> Result<Vec<CountryTotal>> {
    // ORDER BY direction cannot be bound as a parameter.
    let order = match rank {
      Rank::Highest => "DESC",
      Rank::Lowest => "ASC",
    };
    let sql = format!(
      "SELECT c.country_name, SUM(s.sales) AS total_sales
       FROM petroleum_sales s
       JOIN country c ON c.id = s.country_id
       GROUP BY c.country_name
       ORDER BY total_sales {order}, c.country_name ASC
       LIMIT ?1"
    );

    let rows = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt
          .query_map(rusqlite::params![limit], |row| {
            Ok(CountryTotal { country: row.get(0)?, total: row.get(1)? })
          })?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    Ok(rows)
  }

  async fn yearly_sales(&self) -> Result<Vec<YearlySale>> {
    let rows = self
      .conn
      .call(|conn| {
        // rowid order is insertion order, which the bucket averaging
        // relies on for its last-write-wins rule.
        let mut stmt = conn.prepare(
          "SELECT s.year, p.product_name, s.sales
           FROM petroleum_sales s
           JOIN petroleum_product p ON p.id = s.product_id
           ORDER BY s.id ASC",
        )?;
        let rows = stmt
          .query_map([], |row| {
            Ok(YearlySale {
              year:    row.get(0)?,
              product: row.get(1)?,
              sales:   row.get(2)?,
            })
          })?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    Ok(rows)
  }

  async fn fact_count(&self) -> Result<u64> {
    let count = self
      .conn
      .call(|conn| {
        let count: u64 = conn.query_row(
          "SELECT COUNT(*) FROM petroleum_sales",
          [],
          |row| row.get(0),
        )?;
        Ok(count)
      })
      .await?;

    Ok(count)
  }
}
