//! Configuration and router assembly for the holiday mirror server.

use std::path::{Path, PathBuf};

use anyhow::{Context as _, ensure};
use axum::Router;
use config::{Config, ConfigBuilder, Environment, File, builder::DefaultState};
use holiday_core::{provider::HolidayProvider, store::HolidayStore, years::SupportedYears};
use holiday_nager::NagerConfig;
use holiday_sync::{
  HolidayService,
  schedule::{DEFAULT_CRON, DEFAULT_TIME_ZONE},
};
use serde::Deserialize;
use tower_http::trace::TraceLayer;

// ─── Configuration ────────────────────────────────────────────────────────────

/// Runtime configuration, deserialised from `config.toml` and `HOLIDAY_*`
/// environment variables.
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
  pub host:         String,
  pub port:         u16,
  pub store_path:   PathBuf,
  /// Populate an empty store from the provider before serving.
  pub initial_load: bool,
  pub provider:     NagerConfig,
  pub years:        SupportedYears,
  pub schedule:     ScheduleConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ScheduleConfig {
  pub enabled:  bool,
  /// Six-field cron expression (seconds first).
  pub cron:     String,
  /// IANA zone the cron expression is evaluated in.
  pub timezone: String,
}

impl ServerConfig {
  pub fn address(&self) -> String { format!("{}:{}", self.host, self.port) }
}

/// A builder holding every default; sources added on top override them.
pub fn defaults() -> Result<ConfigBuilder<DefaultState>, config::ConfigError> {
  let years = SupportedYears::default();
  let provider = NagerConfig::default();

  Config::builder()
    .set_default("host", "127.0.0.1")?
    .set_default("port", 8080)?
    .set_default("store_path", "holidays.db")?
    .set_default("initial_load", true)?
    .set_default("provider.base_url", provider.base_url)?
    .set_default("provider.timeout_secs", provider.timeout_secs)?
    .set_default("years.first", i64::from(years.first))?
    .set_default("years.last", i64::from(years.last))?
    .set_default("schedule.enabled", true)?
    .set_default("schedule.cron", DEFAULT_CRON)?
    .set_default("schedule.timezone", DEFAULT_TIME_ZONE)
}

/// Read `path` (if it exists) and the environment on top of [`defaults`].
///
/// Environment keys use a `HOLIDAY_` prefix and `__` between nested keys,
/// e.g. `HOLIDAY_PORT` or `HOLIDAY_SCHEDULE__ENABLED`.
pub fn load_config(path: &Path) -> anyhow::Result<ServerConfig> {
  let settings = defaults()?
    .add_source(File::from(path).required(false))
    .add_source(
      Environment::with_prefix("HOLIDAY")
        .prefix_separator("_")
        .separator("__")
        .try_parsing(true),
    )
    .build()
    .context("failed to read config file")?;

  finish(settings)
}

fn finish(settings: Config) -> anyhow::Result<ServerConfig> {
  let mut cfg: ServerConfig = settings
    .try_deserialize()
    .context("failed to deserialise ServerConfig")?;

  ensure!(
    cfg.years.first <= cfg.years.last,
    "years.first ({}) is after years.last ({})",
    cfg.years.first,
    cfg.years.last
  );
  cfg.store_path = expand_tilde(&cfg.store_path);
  Ok(cfg)
}

/// Expand a leading `~` to the user's home directory.
pub fn expand_tilde(path: &Path) -> PathBuf {
  let s = path.to_string_lossy();
  if let Some(rest) = s.strip_prefix("~/")
    && let Ok(home) = std::env::var("HOME")
  {
    return PathBuf::from(home).join(rest);
  }
  path.to_path_buf()
}

// ─── Router ───────────────────────────────────────────────────────────────────

/// The full application: the JSON API under `/api`, with request tracing.
pub fn router<S, P>(service: HolidayService<S, P>) -> Router
where
  S: HolidayStore + 'static,
  P: HolidayProvider + 'static,
{
  Router::new()
    .nest("/api", holiday_api::api_router(service))
    .layer(TraceLayer::new_for_http())
}
