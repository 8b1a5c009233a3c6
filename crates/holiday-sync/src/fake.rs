//! In-process [`HolidayProvider`] with canned responses and call counters.

use std::sync::{
  Mutex,
  atomic::{AtomicBool, AtomicUsize, Ordering},
};

use chrono::NaiveDate;
use holiday_core::provider::{HolidayProvider, ProviderCountry, ProviderHoliday};

type HolidayFn = Box<dyn Fn(i32, &str) -> Vec<ProviderHoliday> + Send>;

#[derive(Debug, thiserror::Error)]
#[error("provider unavailable")]
pub struct Unavailable;

pub struct FakeProvider {
  countries:     Mutex<Vec<ProviderCountry>>,
  holidays:      Mutex<HolidayFn>,
  failing:       AtomicBool,
  failing_for:   Mutex<Option<String>>,
  country_calls: AtomicUsize,
  holiday_calls: AtomicUsize,
}

impl FakeProvider {
  /// A provider listing `countries` that reports no holidays.
  pub fn new(countries: &[(&str, &str)]) -> Self {
    Self {
      countries:     Mutex::new(
        countries
          .iter()
          .map(|(code, name)| ProviderCountry {
            country_code: (*code).into(),
            name:         (*name).into(),
          })
          .collect(),
      ),
      holidays:      Mutex::new(Box::new(|_, _| vec![])),
      failing:       AtomicBool::new(false),
      failing_for:   Mutex::new(None),
      country_calls: AtomicUsize::new(0),
      holiday_calls: AtomicUsize::new(0),
    }
  }

  pub fn set_holidays(
    &self,
    f: impl Fn(i32, &str) -> Vec<ProviderHoliday> + Send + 'static,
  ) {
    *self.holidays.lock().unwrap() = Box::new(f);
  }

  /// Make every holiday request fail.
  pub fn set_failing(&self, failing: bool) {
    self.failing.store(failing, Ordering::SeqCst);
  }

  /// Make holiday requests for `country_code` alone fail.
  pub fn fail_for(&self, country_code: &str) {
    *self.failing_for.lock().unwrap() = Some(country_code.to_owned());
  }

  /// `(country list calls, holiday calls)` so far.
  pub fn calls(&self) -> (usize, usize) {
    (
      self.country_calls.load(Ordering::SeqCst),
      self.holiday_calls.load(Ordering::SeqCst),
    )
  }
}

impl HolidayProvider for FakeProvider {
  type Error = Unavailable;

  async fn available_countries(&self) -> Result<Vec<ProviderCountry>, Unavailable> {
    self.country_calls.fetch_add(1, Ordering::SeqCst);
    Ok(self.countries.lock().unwrap().clone())
  }

  async fn public_holidays(
    &self,
    year:         i32,
    country_code: &str,
  ) -> Result<Vec<ProviderHoliday>, Unavailable> {
    self.holiday_calls.fetch_add(1, Ordering::SeqCst);
    if self.failing.load(Ordering::SeqCst)
      || self.failing_for.lock().unwrap().as_deref() == Some(country_code)
    {
      return Err(Unavailable);
    }
    let holidays = self.holidays.lock().unwrap();
    Ok((*holidays)(year, country_code))
  }
}

/// A provider holiday record with the given date, names and types.
pub fn record(
  date: NaiveDate,
  local_name: &str,
  name: &str,
  country_code: &str,
  types: &[&str],
) -> ProviderHoliday {
  ProviderHoliday {
    date,
    local_name:   local_name.into(),
    name:         name.into(),
    country_code: country_code.into(),
    fixed:        false,
    global:       true,
    launch_year:  Some(1949),
    types:        Some(types.iter().map(|t| (*t).to_owned()).collect()),
  }
}

/// January 1st of `year`, as the provider reports it for Korea.
pub fn new_years_day(year: i32, country_code: &str) -> ProviderHoliday {
  record(
    NaiveDate::from_ymd_opt(year, 1, 1).unwrap(),
    "새해",
    "New Year's Day",
    country_code,
    &["Public"],
  )
}
