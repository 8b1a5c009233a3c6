//! Error type for `holiday-sync`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  /// Validation and unknown-entity failures.
  #[error(transparent)]
  Core(#[from] holiday_core::Error),

  #[error("store error: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),

  #[error("provider error: {0}")]
  Provider(#[source] Box<dyn std::error::Error + Send + Sync>),

  #[error("invalid cron expression {expression:?}: {source}")]
  Cron {
    expression: String,
    #[source]
    source:     cron::error::Error,
  },

  #[error("unknown time zone {0:?}")]
  TimeZone(String),
}

impl Error {
  pub(crate) fn store(e: impl std::error::Error + Send + Sync + 'static) -> Self {
    Self::Store(Box::new(e))
  }

  pub(crate) fn provider(e: impl std::error::Error + Send + Sync + 'static) -> Self {
    Self::Provider(Box::new(e))
  }

  /// `true` for a rejected year; the scheduled trigger skips these.
  pub fn is_year_out_of_range(&self) -> bool {
    matches!(self, Self::Core(holiday_core::Error::YearOutOfRange { .. }))
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
