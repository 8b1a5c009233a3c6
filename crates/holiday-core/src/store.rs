//! The `HolidayStore` trait.
//!
//! The trait is implemented by storage backends (e.g. `holiday-store-sqlite`).
//! The sync service depends on this abstraction, not on any concrete backend.

use std::future::Future;

use crate::{
  country::{Country, HolidayType, NewCountry},
  holiday::{Holiday, NewHoliday},
  query::{HolidayQuery, Page, PageRequest},
};

/// Abstraction over the relational store that mirrors provider data.
///
/// Every write method is a single all-or-nothing transaction: on error the
/// store is left as it was before the call.
///
/// All methods return `Send` futures so the trait can be used in multi-threaded
/// async runtimes (e.g. tokio with `axum`).
pub trait HolidayStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  // ── Countries and types ───────────────────────────────────────────────

  /// Retrieve a country by its (uppercase) code. Returns `None` if unknown.
  fn get_country<'a>(
    &'a self,
    code: &'a str,
  ) -> impl Future<Output = Result<Option<Country>, Self::Error>> + Send + 'a;

  /// List every stored country, ordered by code.
  fn list_countries(
    &self,
  ) -> impl Future<Output = Result<Vec<Country>, Self::Error>> + Send + '_;

  fn get_holiday_type<'a>(
    &'a self,
    code: &'a str,
  ) -> impl Future<Output = Result<Option<HolidayType>, Self::Error>> + Send + 'a;

  // ── Holidays — writes ─────────────────────────────────────────────────

  /// Insert every country and every holiday in one transaction. Holiday
  /// types referenced by the holidays are created as needed.
  ///
  /// Returns the number of holiday rows inserted.
  fn load_all(
    &self,
    countries: Vec<NewCountry>,
    holidays: Vec<NewHoliday>,
  ) -> impl Future<Output = Result<usize, Self::Error>> + Send + '_;

  /// Re-sync `year` for every country in `countries`, in one transaction:
  /// insert any country row that is missing, delete each listed country's
  /// holidays of `year`, then insert `holidays`.
  ///
  /// Returns the number of holiday rows inserted. A holiday whose country is
  /// not listed fails the whole call and nothing is written.
  fn replace_year(
    &self,
    year: i32,
    countries: Vec<NewCountry>,
    holidays: Vec<NewHoliday>,
  ) -> impl Future<Output = Result<usize, Self::Error>> + Send + '_;

  /// Delete every holiday of (`country_code`, `year`). Returns rows removed.
  fn delete_holidays<'a>(
    &'a self,
    country_code: &'a str,
    year: i32,
  ) -> impl Future<Output = Result<usize, Self::Error>> + Send + 'a;

  // ── Holidays — reads ──────────────────────────────────────────────────

  fn count_holidays(
    &self,
  ) -> impl Future<Output = Result<u64, Self::Error>> + Send + '_;

  /// Return one page of holidays matching every present filter of `query`.
  fn search<'a>(
    &'a self,
    query: &'a HolidayQuery,
    page: PageRequest,
  ) -> impl Future<Output = Result<Page<Holiday>, Self::Error>> + Send + 'a;
}
