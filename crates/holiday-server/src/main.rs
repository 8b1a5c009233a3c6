//! holiday-server binary.
//!
//! Reads `config.toml` (or the path given with `--config`), opens the SQLite
//! store, loads it from Nager.Date when empty, starts the yearly sync and
//! serves the JSON API over HTTP.
//!
//! The maintenance subcommands run one operation against the configured
//! store and exit:
//!
//! ```
//! cargo run -p holiday-server -- refresh --year 2025 --country KR
//! ```

use std::{path::PathBuf, sync::Arc};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use holiday_nager::NagerClient;
use holiday_store_sqlite::SqliteStore;
use holiday_sync::{HolidayService, InitialLoad, Scheduler};
use holiday_server::{ServerConfig, load_config};
use tokio::net::TcpListener;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

type Service = HolidayService<SqliteStore, NagerClient>;

#[derive(Parser)]
#[command(author, version, about = "Public holiday mirror server")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "config.toml")]
  config: PathBuf,

  #[command(subcommand)]
  command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
  /// Serve the HTTP API and run the scheduled sync (the default).
  Serve,
  /// Re-fetch one country's holidays for one year.
  Refresh {
    #[arg(long)]
    year:    i32,
    #[arg(long)]
    country: String,
  },
  /// Delete one country's stored holidays for one year.
  Delete {
    #[arg(long)]
    year:    i32,
    #[arg(long)]
    country: String,
  },
  /// Re-fetch one year for every stored country.
  SyncYear {
    #[arg(long)]
    year: i32,
  },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  // Initialise tracing.
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .init();

  let cli = Cli::parse();
  let cfg = load_config(&cli.config)?;

  let store = SqliteStore::open(&cfg.store_path)
    .await
    .with_context(|| format!("failed to open store at {:?}", cfg.store_path))?;
  let provider = NagerClient::new(cfg.provider.clone())
    .context("failed to build provider client")?;
  let service = HolidayService::new(Arc::new(store), Arc::new(provider), cfg.years);

  match cli.command.unwrap_or(Command::Serve) {
    Command::Serve => serve(cfg, service).await,
    Command::Refresh { year, country } => {
      let stored = service
        .refresh(year, &country)
        .await
        .with_context(|| format!("failed to refresh {country} {year}"))?;
      println!("{stored} holidays stored for {} {year}", country.to_uppercase());
      Ok(())
    }
    Command::Delete { year, country } => {
      let removed = service
        .delete_year_country(year, &country)
        .await
        .with_context(|| format!("failed to delete {country} {year}"))?;
      println!("{removed} holidays deleted");
      Ok(())
    }
    Command::SyncYear { year } => {
      let stored = service
        .sync_all_countries_for_year(year)
        .await
        .with_context(|| format!("failed to sync {year}"))?;
      println!("{stored} holidays stored for {year}");
      Ok(())
    }
  }
}

async fn serve(cfg: ServerConfig, service: Service) -> anyhow::Result<()> {
  if cfg.initial_load {
    match service.initial_load().await {
      Ok(InitialLoad::Loaded { countries, holidays }) => {
        tracing::info!(countries, holidays, "store populated");
      }
      Ok(InitialLoad::Skipped) => {}
      // Serve whatever is already stored; a later refresh can fill the gap.
      Err(e) => tracing::error!("initial holiday load failed: {e}"),
    }
  }

  if cfg.schedule.enabled {
    let scheduler = Scheduler::new(service.clone(), &cfg.schedule.cron, &cfg.schedule.timezone)
      .context("invalid schedule configuration")?;
    tokio::spawn(scheduler.run());
  } else {
    tracing::info!("scheduled holiday sync disabled");
  }

  let app = holiday_server::router(service);
  let address = cfg.address();

  tracing::info!("Listening on http://{address}");
  let listener = TcpListener::bind(&address)
    .await
    .with_context(|| format!("failed to bind {address}"))?;

  axum::serve(listener, app).await.context("server error")?;

  Ok(())
}
