//! SQL schema for the petrol SQLite store.
//!
//! Executed once at connection startup via `PRAGMA user_version`. Future
//! migrations will be gated on that version number.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
///
/// Dimension names are `UNIQUE` so ingestion can upsert: re-running against
/// a populated database keeps the existing surrogate keys instead of
/// growing the dimension tables.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;
PRAGMA foreign_keys = ON;

CREATE TABLE IF NOT EXISTS country (
    id           INTEGER PRIMARY KEY AUTOINCREMENT,
    country_name TEXT NOT NULL UNIQUE
);

CREATE TABLE IF NOT EXISTS petroleum_product (
    id           INTEGER PRIMARY KEY AUTOINCREMENT,
    product_name TEXT NOT NULL UNIQUE
);

-- One row per raw input record; repeated raw entries stay repeated here.
CREATE TABLE IF NOT EXISTS petroleum_sales (
    id         INTEGER PRIMARY KEY AUTOINCREMENT,
    country_id INTEGER NOT NULL REFERENCES country(id),
    product_id INTEGER NOT NULL REFERENCES petroleum_product(id),
    year       INTEGER NOT NULL,
    sales      REAL NOT NULL
);

CREATE INDEX IF NOT EXISTS sales_country_idx ON petroleum_sales(country_id);
CREATE INDEX IF NOT EXISTS sales_product_idx ON petroleum_sales(product_id);
CREATE INDEX IF NOT EXISTS sales_year_idx    ON petroleum_sales(year);

PRAGMA user_version = 1;
";
