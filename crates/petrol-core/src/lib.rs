//! Core types and pipeline logic for the petrol sales report.
//!
//! This crate is deliberately free of HTTP and database dependencies.
//! The store crate and the binary depend on it; it depends on nothing
//! heavier than serde.

pub mod error;
pub mod record;
pub mod report;
pub mod store;

pub use error::{Error, Result};
pub use record::{DimensionKeys, RawRecord, SaleRow, distinct_dimensions, normalize};
