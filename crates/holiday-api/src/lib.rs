//! JSON REST API for the holiday mirror.
//!
//! Exposes an axum [`Router`] backed by a [`HolidayService`]. Every handler is
//! a thin pass-through to the service.
//!
//! # Mounting
//!
//! ```rust,ignore
//! .nest("/api", holiday_api::api_router(service.clone()))
//! ```

pub mod error;
pub mod holidays;

use axum::{
  Router,
  routing::{get, post},
};
use holiday_core::{provider::HolidayProvider, store::HolidayStore};
use holiday_sync::HolidayService;

pub use error::ApiError;

/// Build the API router for `service`.
///
/// The returned `Router<()>` can be nested into any parent router regardless
/// of its own state type.
pub fn api_router<S, P>(service: HolidayService<S, P>) -> Router<()>
where
  S: HolidayStore + 'static,
  P: HolidayProvider + 'static,
{
  Router::new()
    .route(
      "/holidays",
      get(holidays::search::<S, P>).delete(holidays::delete::<S, P>),
    )
    .route("/holidays/refresh", post(holidays::refresh::<S, P>))
    .with_state(service)
}
