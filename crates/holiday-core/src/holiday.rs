//! Holiday rows — one per (country, date) occurrence.

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// A stored holiday, joined with its country name for display.
///
/// `year` is always the calendar year of `date`; the store derives it on
/// insert and it is never accepted from callers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Holiday {
  /// Store-assigned surrogate identity.
  pub id:           i64,
  pub country_code: String,
  pub country_name: String,
  pub date:         NaiveDate,
  pub year:         i32,
  /// Name in the country's own language.
  pub local_name:   String,
  /// Canonical (English) name.
  pub name:         String,
  pub type_code:    Option<String>,
  /// Falls on the same calendar date every year.
  pub fixed:        bool,
  /// Observed nationwide rather than in some regions only.
  pub global:       bool,
  /// First year the holiday was observed, when known.
  pub launch_year:  Option<i32>,
  pub created_at:   DateTime<Utc>,
  pub updated_at:   DateTime<Utc>,
}

/// Input to the holiday write methods of [`crate::store::HolidayStore`].
///
/// There is no year field: the year is derived from `date`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewHoliday {
  pub country_code: String,
  pub date:         NaiveDate,
  pub local_name:   String,
  pub name:         String,
  pub type_code:    Option<String>,
  pub fixed:        bool,
  pub global:       bool,
  pub launch_year:  Option<i32>,
}

impl NewHoliday {
  /// The year this holiday will be stored under.
  pub fn year(&self) -> i32 { self.date.year() }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn year_follows_date() {
    let h = NewHoliday {
      country_code: "KR".into(),
      date:         NaiveDate::from_ymd_opt(2023, 12, 25).unwrap(),
      local_name:   "기독탄신일".into(),
      name:         "Christmas Day".into(),
      type_code:    Some("Public".into()),
      fixed:        true,
      global:       true,
      launch_year:  None,
    };
    assert_eq!(h.year(), 2023);
  }
}
