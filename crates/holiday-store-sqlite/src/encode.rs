//! Encoding and decoding helpers between domain types and the plain-text
//! representations stored in SQLite columns.
//!
//! Timestamps are stored as RFC 3339 strings and calendar dates as
//! `YYYY-MM-DD`, so lexical order matches chronological order.

use chrono::{DateTime, NaiveDate, Utc};
use holiday_core::{country::Country, holiday::Holiday};

use crate::{Error, Result};

// ─── DateTime<Utc> ───────────────────────────────────────────────────────────

pub fn encode_dt(dt: DateTime<Utc>) -> String { dt.to_rfc3339() }

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| Error::DateParse(e.to_string()))
}

// ─── NaiveDate ───────────────────────────────────────────────────────────────

const DATE_FORMAT: &str = "%Y-%m-%d";

pub fn encode_date(d: NaiveDate) -> String { d.format(DATE_FORMAT).to_string() }

pub fn decode_date(s: &str) -> Result<NaiveDate> {
  NaiveDate::parse_from_str(s, DATE_FORMAT)
    .map_err(|e| Error::DateParse(format!("{s:?}: {e}")))
}

// ─── Row types ───────────────────────────────────────────────────────────────

/// Raw values read directly from a `countries` row.
pub struct RawCountry {
  pub code:       String,
  pub name:       String,
  pub region:     Option<String>,
  pub created_at: String,
  pub updated_at: String,
}

impl RawCountry {
  pub const COLUMNS: &'static str = "code, name, region, created_at, updated_at";

  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      code:       row.get(0)?,
      name:       row.get(1)?,
      region:     row.get(2)?,
      created_at: row.get(3)?,
      updated_at: row.get(4)?,
    })
  }

  pub fn into_country(self) -> Result<Country> {
    Ok(Country {
      code:       self.code,
      name:       self.name,
      region:     self.region,
      created_at: decode_dt(&self.created_at)?,
      updated_at: decode_dt(&self.updated_at)?,
    })
  }
}

/// Raw values read from a `holidays` row joined with its country.
pub struct RawHoliday {
  pub id:           i64,
  pub country_code: String,
  pub country_name: String,
  pub date:         String,
  pub year:         i32,
  pub local_name:   String,
  pub name:         String,
  pub type_code:    Option<String>,
  pub fixed:        bool,
  pub global:       bool,
  pub launch_year:  Option<i32>,
  pub created_at:   String,
  pub updated_at:   String,
}

impl RawHoliday {
  /// Select list matching [`RawHoliday::from_row`]; expects `holidays h`
  /// joined with `countries c`.
  pub const COLUMNS: &'static str = "h.id, h.country_code, c.name, h.holiday_date, h.holiday_year,
     h.local_name, h.name, h.type_code, h.is_fixed, h.is_global,
     h.launch_year, h.created_at, h.updated_at";

  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      id:           row.get(0)?,
      country_code: row.get(1)?,
      country_name: row.get(2)?,
      date:         row.get(3)?,
      year:         row.get(4)?,
      local_name:   row.get(5)?,
      name:         row.get(6)?,
      type_code:    row.get(7)?,
      fixed:        row.get(8)?,
      global:       row.get(9)?,
      launch_year:  row.get(10)?,
      created_at:   row.get(11)?,
      updated_at:   row.get(12)?,
    })
  }

  pub fn into_holiday(self) -> Result<Holiday> {
    Ok(Holiday {
      id:           self.id,
      country_code: self.country_code,
      country_name: self.country_name,
      date:         decode_date(&self.date)?,
      year:         self.year,
      local_name:   self.local_name,
      name:         self.name,
      type_code:    self.type_code,
      fixed:        self.fixed,
      global:       self.global,
      launch_year:  self.launch_year,
      created_at:   decode_dt(&self.created_at)?,
      updated_at:   decode_dt(&self.updated_at)?,
    })
  }
}
