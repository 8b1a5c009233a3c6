//! Synchronisation and search over a [`HolidayStore`] fed by a
//! [`HolidayProvider`], plus the yearly scheduled refresh.
//!
//! [`HolidayStore`]: holiday_core::store::HolidayStore
//! [`HolidayProvider`]: holiday_core::provider::HolidayProvider

pub mod error;
pub mod schedule;
pub mod service;

pub use error::{Error, Result};
pub use schedule::{Scheduler, TriggerReport};
pub use service::{HolidayService, InitialLoad};

#[cfg(test)]
mod fake;
