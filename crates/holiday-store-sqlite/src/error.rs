//! Error type for `holiday-store-sqlite`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("database error: {0}")]
  Database(#[from] tokio_rusqlite::Error),

  #[error("date/time parse error: {0}")]
  DateParse(String),

  /// A year replacement carried a holiday for a country it does not list.
  #[error("holiday for country {0} is not covered by this sync")]
  UnlistedCountry(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
