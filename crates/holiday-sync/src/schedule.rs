//! The yearly scheduled refresh.
//!
//! A cron expression (with a seconds field) is evaluated in a named time
//! zone. On each fire, the previous and the current year (as seen from that
//! zone's clock) are re-synced for every stored country.

use std::str::FromStr;

use chrono::{DateTime, Datelike, Utc};
use chrono_tz::Tz;
use cron::Schedule;
use holiday_core::{provider::HolidayProvider, store::HolidayStore};
use tracing::{error, info, warn};

use crate::{Error, HolidayService, Result};

/// 01:00:00 on January 2nd.
pub const DEFAULT_CRON: &str = "0 0 1 2 1 *";
pub const DEFAULT_TIME_ZONE: &str = "Asia/Seoul";

/// What one firing of the trigger did.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TriggerReport {
  /// `(year, holidays stored)` for every year that synced.
  pub synced:  Vec<(i32, usize)>,
  /// Years outside the supported range.
  pub skipped: Vec<i32>,
  /// The year whose sync failed for any other reason; later years of the
  /// same firing are not attempted.
  pub failed:  Option<i32>,
}

pub struct Scheduler<S, P> {
  service:  HolidayService<S, P>,
  schedule: Schedule,
  tz:       Tz,
}

impl<S, P> Scheduler<S, P>
where
  S: HolidayStore,
  P: HolidayProvider,
{
  pub fn new(service: HolidayService<S, P>, expression: &str, time_zone: &str) -> Result<Self> {
    let schedule = Schedule::from_str(expression).map_err(|source| Error::Cron {
      expression: expression.to_owned(),
      source,
    })?;
    let tz = Tz::from_str(time_zone).map_err(|_| Error::TimeZone(time_zone.to_owned()))?;
    Ok(Self { service, schedule, tz })
  }

  /// The first fire instant strictly after `after`, in the trigger's zone.
  pub fn next_fire(&self, after: DateTime<Utc>) -> Option<DateTime<Tz>> {
    self.schedule.after(&after.with_timezone(&self.tz)).next()
  }

  /// Sleep until each fire instant and run the sync. Never returns unless the
  /// schedule has no upcoming instant.
  pub async fn run(self) {
    loop {
      let now = Utc::now();
      let Some(next) = self.next_fire(now) else {
        warn!("holiday sync schedule has no upcoming fire time; stopping");
        return;
      };

      info!(next = %next, "next scheduled holiday sync");
      let wait = (next.with_timezone(&Utc) - now).to_std().unwrap_or_default();
      tokio::time::sleep(wait).await;

      // Woke early (clock adjustment); go back to sleep for the remainder.
      if Utc::now() < next.with_timezone(&Utc) {
        continue;
      }

      let current_year = Utc::now().with_timezone(&self.tz).year();
      self.sync_current_and_previous(current_year).await;
    }
  }

  /// Sync the previous year and then `current_year` for all countries.
  pub async fn sync_current_and_previous(&self, current_year: i32) -> TriggerReport {
    let previous_year = current_year - 1;
    info!(previous = previous_year, current = current_year, "scheduled holiday sync started");

    let mut report = TriggerReport::default();
    for year in [previous_year, current_year] {
      match self.service.sync_all_countries_for_year(year).await {
        Ok(stored) => report.synced.push((year, stored)),
        Err(e) if e.is_year_out_of_range() => {
          warn!(year, "skipping scheduled sync: {e}");
          report.skipped.push(year);
        }
        Err(e) => {
          error!(year, "scheduled holiday sync failed: {e}");
          report.failed = Some(year);
          break;
        }
      }
    }

    info!(?report, "scheduled holiday sync finished");
    report
  }
}
