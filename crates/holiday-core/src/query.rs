//! Search filters, sorting and pagination.

use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::Error;

// ─── Filters ─────────────────────────────────────────────────────────────────

/// Parameters for [`crate::store::HolidayStore::search`].
///
/// Every filter is optional; the present ones are combined with AND.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HolidayQuery {
  pub year:         Option<i32>,
  /// Exact match against the uppercased country code.
  pub country_code: Option<String>,
  /// Inclusive lower bound on the holiday date.
  pub from:         Option<NaiveDate>,
  /// Inclusive upper bound on the holiday date.
  pub to:           Option<NaiveDate>,
  pub type_code:    Option<String>,
}

impl HolidayQuery {
  /// Uppercase the country code and treat blank strings as absent.
  pub fn normalized(self) -> Self {
    Self {
      country_code: non_blank(self.country_code).map(|c| c.to_uppercase()),
      type_code: non_blank(self.type_code),
      ..self
    }
  }
}

fn non_blank(s: Option<String>) -> Option<String> {
  s.map(|s| s.trim().to_owned()).filter(|s| !s.is_empty())
}

// ─── Sorting ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortField {
  #[default]
  Date,
  Id,
  Name,
  Year,
  CountryCode,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
  #[default]
  Asc,
  Desc,
}

/// Primary ordering of a search. The holiday id is always appended as an
/// ascending tie-breaker so pages are stable.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Sort {
  pub field:     SortField,
  pub direction: Direction,
}

impl FromStr for Sort {
  type Err = Error;

  /// Parse `field[,asc|desc]`, e.g. `date`, `name,desc`, `countryCode,asc`.
  fn from_str(s: &str) -> Result<Self, Self::Err> {
    let mut parts = s.split(',').map(str::trim);
    let field = match parts.next().unwrap_or_default() {
      "date" => SortField::Date,
      "id" => SortField::Id,
      "name" => SortField::Name,
      "year" => SortField::Year,
      "countryCode" | "country_code" => SortField::CountryCode,
      _ => return Err(Error::InvalidSort(s.to_owned())),
    };
    let direction = match parts.next().map(str::to_ascii_lowercase).as_deref() {
      None | Some("asc") => Direction::Asc,
      Some("desc") => Direction::Desc,
      Some(_) => return Err(Error::InvalidSort(s.to_owned())),
    };
    if parts.next().is_some() {
      return Err(Error::InvalidSort(s.to_owned()));
    }
    Ok(Self { field, direction })
  }
}

// ─── Pagination ──────────────────────────────────────────────────────────────

pub const DEFAULT_PAGE_SIZE: u32 = 20;
pub const MAX_PAGE_SIZE: u32 = 2000;

/// A zero-based page request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
  pub page: u32,
  pub size: u32,
  pub sort: Sort,
}

impl Default for PageRequest {
  fn default() -> Self { Self::new(0, DEFAULT_PAGE_SIZE) }
}

impl PageRequest {
  /// A size of zero falls back to [`DEFAULT_PAGE_SIZE`]; sizes above
  /// [`MAX_PAGE_SIZE`] are clamped.
  pub fn new(page: u32, size: u32) -> Self {
    let size = match size {
      0 => DEFAULT_PAGE_SIZE,
      s => s.min(MAX_PAGE_SIZE),
    };
    Self { page, size, sort: Sort::default() }
  }

  pub fn with_sort(self, sort: Sort) -> Self { Self { sort, ..self } }

  pub fn offset(&self) -> u64 { u64::from(self.page) * u64::from(self.size) }
}

/// One page of results plus the total number of matches.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page<T> {
  pub content:        Vec<T>,
  pub page:           u32,
  pub size:           u32,
  pub total_elements: u64,
}

impl<T> Page<T> {
  pub fn total_pages(&self) -> u64 {
    self.total_elements.div_ceil(u64::from(self.size.max(1)))
  }

  pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
    Page {
      content:        self.content.into_iter().map(f).collect(),
      page:           self.page,
      size:           self.size,
      total_elements: self.total_elements,
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn normalized_uppercases_and_drops_blanks() {
    let q = HolidayQuery {
      country_code: Some(" kr ".into()),
      type_code: Some("   ".into()),
      ..Default::default()
    }
    .normalized();
    assert_eq!(q.country_code.as_deref(), Some("KR"));
    assert_eq!(q.type_code, None);
  }

  #[test]
  fn sort_parses_field_and_direction() {
    assert_eq!("date".parse::<Sort>().unwrap(), Sort::default());
    assert_eq!(
      "name,desc".parse::<Sort>().unwrap(),
      Sort { field: SortField::Name, direction: Direction::Desc }
    );
    assert_eq!(
      "countryCode,ASC".parse::<Sort>().unwrap().field,
      SortField::CountryCode
    );
    assert!("launchYear".parse::<Sort>().is_err());
    assert!("date,sideways".parse::<Sort>().is_err());
  }

  #[test]
  fn page_request_clamps_size() {
    assert_eq!(PageRequest::new(0, 0).size, DEFAULT_PAGE_SIZE);
    assert_eq!(PageRequest::new(0, 50_000).size, MAX_PAGE_SIZE);
    assert_eq!(PageRequest::new(3, 10).offset(), 30);
  }

  #[test]
  fn total_pages_rounds_up() {
    let page: Page<()> = Page {
      content:        vec![],
      page:           0,
      size:           20,
      total_elements: 41,
    };
    assert_eq!(page.total_pages(), 3);
  }
}
