//! Error type for `holiday-nager`.

use reqwest::StatusCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("failed to build HTTP client: {0}")]
  Client(#[source] reqwest::Error),

  #[error("GET {path} failed: {source}")]
  Http {
    path:   String,
    #[source]
    source: reqwest::Error,
  },

  #[error("GET {path} → {status}")]
  Status { path: String, status: StatusCode },

  #[error("GET {path}: malformed response: {source}")]
  Decode {
    path:   String,
    #[source]
    source: serde_json::Error,
  },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
