//! The inclusive range of years the mirror accepts for sync operations.

use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Inclusive bound outside of which refresh, delete and sync are rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SupportedYears {
  pub first: i32,
  pub last:  i32,
}

impl Default for SupportedYears {
  fn default() -> Self { Self::new(2020, 2025) }
}

impl SupportedYears {
  pub const fn new(first: i32, last: i32) -> Self { Self { first, last } }

  pub fn contains(&self, year: i32) -> bool {
    (self.first..=self.last).contains(&year)
  }

  /// Return `year` unchanged if it is supported, otherwise
  /// [`Error::YearOutOfRange`].
  pub fn check(&self, year: i32) -> Result<i32> {
    if self.contains(year) {
      Ok(year)
    } else {
      Err(Error::YearOutOfRange {
        year,
        first: self.first,
        last: self.last,
      })
    }
  }

  pub fn years(&self) -> RangeInclusive<i32> { self.first..=self.last }
}
