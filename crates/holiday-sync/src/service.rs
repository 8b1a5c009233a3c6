//! [`HolidayService`] — initial load, refresh, delete and search.
//!
//! Every write operation fetches everything it needs from the provider first
//! and then applies it through a single store transaction, so a provider or
//! store failure leaves the previous rows (and countries) intact.

use std::sync::Arc;

use chrono::Datelike as _;
use holiday_core::{
  country::NewCountry,
  holiday::{Holiday, NewHoliday},
  provider::HolidayProvider,
  query::{HolidayQuery, Page, PageRequest},
  store::HolidayStore,
  years::SupportedYears,
};
use tracing::{info, warn};

use crate::{Error, Result};

/// Result of [`HolidayService::initial_load`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InitialLoad {
  /// The store already held holidays; nothing was fetched.
  Skipped,
  Loaded { countries: usize, holidays: usize },
}

/// Orchestrates the provider and the store.
///
/// Cloning is cheap — the store and provider are shared through `Arc`.
pub struct HolidayService<S, P> {
  store:    Arc<S>,
  provider: Arc<P>,
  years:    SupportedYears,
}

impl<S, P> Clone for HolidayService<S, P> {
  fn clone(&self) -> Self {
    Self {
      store:    Arc::clone(&self.store),
      provider: Arc::clone(&self.provider),
      years:    self.years,
    }
  }
}

impl<S, P> HolidayService<S, P>
where
  S: HolidayStore,
  P: HolidayProvider,
{
  pub fn new(store: Arc<S>, provider: Arc<P>, years: SupportedYears) -> Self {
    Self { store, provider, years }
  }

  pub fn store(&self) -> &S { &self.store }

  // ── Bulk load ─────────────────────────────────────────────────────────────

  /// Populate an empty store with every provider country and every
  /// supported year of holidays, in one transaction.
  ///
  /// A no-op (with no provider calls) once any holiday row exists.
  pub async fn initial_load(&self) -> Result<InitialLoad> {
    if self.store.count_holidays().await.map_err(Error::store)? > 0 {
      info!("holiday store already populated; skipping initial load");
      return Ok(InitialLoad::Skipped);
    }

    let mut fetched = self
      .provider
      .available_countries()
      .await
      .map_err(Error::provider)?;
    fetched.sort_by(|a, b| a.country_code.cmp(&b.country_code));
    let countries: Vec<NewCountry> = fetched.into_iter().map(NewCountry::from).collect();

    info!(
      countries = countries.len(),
      first = self.years.first,
      last = self.years.last,
      "starting initial holiday load"
    );

    let mut holidays: Vec<NewHoliday> = vec![];
    for year in self.years.years() {
      for country in &countries {
        holidays.extend(self.fetch(year, &country.code).await?);
      }
    }

    let country_count = countries.len();
    let inserted = self
      .store
      .load_all(countries, holidays)
      .await
      .map_err(Error::store)?;

    info!(countries = country_count, holidays = inserted, "initial holiday load complete");
    Ok(InitialLoad::Loaded { countries: country_count, holidays: inserted })
  }

  // ── Writes ────────────────────────────────────────────────────────────────

  /// Re-sync one (country, year) from the provider, replacing what is stored.
  ///
  /// An unknown country is looked up in the provider's country list and
  /// persisted together with its holidays. Returns the number of holidays
  /// now stored.
  pub async fn refresh(&self, year: i32, country_code: &str) -> Result<usize> {
    self.years.check(year)?;
    let code = normalize_code(country_code);

    let country = match self.store.get_country(&code).await.map_err(Error::store)? {
      Some(country) => NewCountry::from(country),
      None => self.country_from_provider(&code).await?,
    };

    let holidays = self.fetch(year, &country.code).await?;
    let stored = self.replace(year, vec![country], holidays).await?;

    info!(country = %code, year, holidays = stored, "synced holidays");
    Ok(stored)
  }

  /// Sync `year` for every stored country. Every country is fetched before
  /// anything is written, and the replacement is a single store transaction.
  /// Returns the total rows stored.
  pub async fn sync_all_countries_for_year(&self, year: i32) -> Result<usize> {
    self.years.check(year)?;

    let countries = self.store.list_countries().await.map_err(Error::store)?;
    let mut holidays = vec![];
    for country in &countries {
      holidays.extend(self.fetch(year, &country.code).await?);
    }

    let country_count = countries.len();
    let countries = countries.into_iter().map(NewCountry::from).collect();
    let total = self.replace(year, countries, holidays).await?;

    info!(year, countries = country_count, holidays = total, "synced year for all countries");
    Ok(total)
  }

  /// Delete every stored holiday of (country, year). Countries and holiday
  /// types are left alone. Returns the number of rows removed.
  pub async fn delete_year_country(&self, year: i32, country_code: &str) -> Result<usize> {
    self.years.check(year)?;
    let code = normalize_code(country_code);

    let removed = self
      .store
      .delete_holidays(&code, year)
      .await
      .map_err(Error::store)?;

    info!(country = %code, year, removed, "deleted holidays");
    Ok(removed)
  }

  // ── Reads ─────────────────────────────────────────────────────────────────

  pub async fn search(&self, query: HolidayQuery, page: PageRequest) -> Result<Page<Holiday>> {
    let query = query.normalized();
    self.store.search(&query, page).await.map_err(Error::store)
  }

  // ── Helpers ───────────────────────────────────────────────────────────────

  async fn replace(
    &self,
    year:      i32,
    countries: Vec<NewCountry>,
    holidays:  Vec<NewHoliday>,
  ) -> Result<usize> {
    let fetched = holidays.len();

    let inserted = self
      .store
      .replace_year(year, countries, holidays)
      .await
      .map_err(Error::store)?;

    if inserted < fetched {
      warn!(
        year,
        skipped = fetched - inserted,
        "provider reported several holidays on the same date; kept the first"
      );
    }
    Ok(inserted)
  }

  async fn fetch(&self, year: i32, country_code: &str) -> Result<Vec<NewHoliday>> {
    let fetched = self
      .provider
      .public_holidays(year, country_code)
      .await
      .map_err(Error::provider)?;

    let (holidays, stray): (Vec<_>, Vec<_>) =
      fetched.into_iter().partition(|h| h.date.year() == year);
    if !stray.is_empty() {
      warn!(
        country = country_code,
        year,
        dropped = stray.len(),
        "provider reported holidays dated outside the requested year"
      );
    }

    Ok(
      holidays
        .into_iter()
        .map(|h| h.into_new_holiday(country_code))
        .collect(),
    )
  }

  /// The provider's entry for `code`, not yet persisted.
  async fn country_from_provider(&self, code: &str) -> Result<NewCountry> {
    let available = self
      .provider
      .available_countries()
      .await
      .map_err(Error::provider)?;

    let found = available
      .into_iter()
      .find(|c| c.country_code.eq_ignore_ascii_case(code))
      .ok_or_else(|| holiday_core::Error::UnknownCountry(code.to_owned()))?;

    info!(country = %code, name = %found.name, "adding country");
    Ok(NewCountry::new(code, found.name))
  }
}

fn normalize_code(code: &str) -> String { code.trim().to_uppercase() }
