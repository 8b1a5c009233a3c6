//! The external holiday provider: its record types and the
//! `HolidayProvider` trait.
//!
//! Field names follow the provider's JSON (`countryCode`, `localName`, ...).

use std::future::Future;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::{country::NewCountry, holiday::NewHoliday};

// ─── Records ─────────────────────────────────────────────────────────────────

/// One entry of the provider's country list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderCountry {
  pub country_code: String,
  pub name:         String,
}

impl From<ProviderCountry> for NewCountry {
  fn from(c: ProviderCountry) -> Self { NewCountry::new(c.country_code, c.name) }
}

/// One public holiday as reported by the provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderHoliday {
  pub date:         NaiveDate,
  pub local_name:   String,
  pub name:         String,
  pub country_code: String,
  #[serde(default)]
  pub fixed:        bool,
  #[serde(default)]
  pub global:       bool,
  #[serde(default)]
  pub launch_year:  Option<i32>,
  /// Classification codes; only the first one is kept.
  #[serde(default)]
  pub types:        Option<Vec<String>>,
}

impl ProviderHoliday {
  /// The first entry of `types` as reported, or `None` if the list is
  /// missing, empty, or starts with a blank code.
  pub fn first_type(&self) -> Option<&str> {
    self
      .types
      .as_deref()
      .and_then(<[String]>::first)
      .map(String::as_str)
      .filter(|t| !t.trim().is_empty())
  }

  /// Convert into an insert for the stored country `country_code`.
  pub fn into_new_holiday(self, country_code: &str) -> NewHoliday {
    let type_code = self.first_type().map(str::to_owned);
    NewHoliday {
      country_code: country_code.to_owned(),
      date: self.date,
      local_name: self.local_name,
      name: self.name,
      type_code,
      fixed: self.fixed,
      global: self.global,
      launch_year: self.launch_year,
    }
  }
}

// ─── Trait ───────────────────────────────────────────────────────────────────

/// Read-only access to the external holiday source.
///
/// Implementations must surface transport failures, non-success responses and
/// malformed payloads as errors; nothing is retried.
pub trait HolidayProvider: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Every country the provider has data for.
  fn available_countries(
    &self,
  ) -> impl Future<Output = Result<Vec<ProviderCountry>, Self::Error>> + Send + '_;

  /// The public holidays of `country_code` in `year`.
  fn public_holidays<'a>(
    &'a self,
    year: i32,
    country_code: &'a str,
  ) -> impl Future<Output = Result<Vec<ProviderHoliday>, Self::Error>> + Send + 'a;
}
