//! Error types for `petrol-core`.

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
  /// A raw record names a country absent from the dimension mapping.
  #[error("unknown country: {0:?}")]
  UnknownCountry(String),

  /// A raw record names a product absent from the dimension mapping.
  #[error("unknown petroleum product: {0:?}")]
  UnknownProduct(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
