//! Error types for `holiday-core`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("year {year} is outside the supported range {first}..={last}")]
  YearOutOfRange { year: i32, first: i32, last: i32 },

  #[error("unknown country code from provider: {0}")]
  UnknownCountry(String),

  #[error("invalid sort: {0:?}")]
  InvalidSort(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
