//! Countries and holiday types — the reference rows that holidays point at.
//!
//! Both are created on demand and never deleted.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A country known to the external provider, keyed by its two-letter code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Country {
  /// ISO 3166-1 alpha-2 code, uppercase. Immutable once created.
  pub code:       String,
  pub name:       String,
  /// Continent or region; the provider does not report one.
  pub region:     Option<String>,
  pub created_at: DateTime<Utc>,
  pub updated_at: DateTime<Utc>,
}

/// A country row to insert if its code is not taken yet.
/// Timestamps are always set by the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCountry {
  pub code:   String,
  pub name:   String,
  pub region: Option<String>,
}

impl NewCountry {
  pub fn new(code: impl Into<String>, name: impl Into<String>) -> Self {
    Self { code: code.into(), name: name.into(), region: None }
  }
}

impl From<Country> for NewCountry {
  fn from(c: Country) -> Self {
    Self { code: c.code, name: c.name, region: c.region }
  }
}

/// A free-form holiday classification code such as `"Public"` or `"Bank"`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct HolidayType {
  pub code: String,
}
