//! HTTP client for the Nager.Date public holiday API.
//!
//! Implements [`holiday_core::provider::HolidayProvider`] with two read-only
//! `GET` calls. No caching, retry or authentication.

mod client;

pub mod error;

pub use client::{NagerClient, NagerConfig, DEFAULT_BASE_URL};
pub use error::{Error, Result};
