//! Core types and trait definitions for the holiday mirror.
//!
//! This crate is deliberately free of HTTP and database dependencies.
//! The store, provider client, sync service and API crates all depend on it.

// We intentionally use native `async fn` in traits (stabilised in Rust 1.75).
// Suppress the advisory lint about `Send` bounds on the returned futures.
#![allow(async_fn_in_trait)]

pub mod country;
pub mod error;
pub mod holiday;
pub mod provider;
pub mod query;
pub mod store;
pub mod years;

pub use error::{Error, Result};
