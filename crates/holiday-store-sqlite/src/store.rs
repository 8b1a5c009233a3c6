//! [`SqliteStore`] — the SQLite implementation of [`HolidayStore`].

use std::path::Path;

use chrono::Utc;
use rusqlite::OptionalExtension as _;

use holiday_core::{
  country::{Country, HolidayType, NewCountry},
  holiday::{Holiday, NewHoliday},
  query::{HolidayQuery, Page, PageRequest},
  store::HolidayStore,
};

use crate::{
  encode::{encode_date, encode_dt, RawCountry, RawHoliday},
  filter::{order_by, Filter},
  schema::SCHEMA,
  Error, Result,
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A holiday store backed by a single SQLite file.
///
/// Cloning is cheap — the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store — useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }
}

// ─── Write helpers ───────────────────────────────────────────────────────────
//
// These run inside `Connection::call` on an open transaction.

fn insert_countries(
  tx: &rusqlite::Transaction<'_>,
  countries: &[NewCountry],
  now: &str,
) -> rusqlite::Result<()> {
  let mut stmt = tx.prepare_cached(
    "INSERT INTO countries (code, name, region, created_at, updated_at)
     VALUES (?1, ?2, ?3, ?4, ?4)
     ON CONFLICT (code) DO NOTHING",
  )?;
  for c in countries {
    stmt.execute(rusqlite::params![c.code, c.name, c.region, now])?;
  }
  Ok(())
}

/// Insert `holidays`, creating any missing holiday type first. A second
/// record for an already-present (country, date) is skipped.
///
/// Returns the number of holiday rows actually inserted.
fn insert_holidays(
  tx: &rusqlite::Transaction<'_>,
  holidays: &[NewHoliday],
  now: &str,
) -> rusqlite::Result<usize> {
  let mut type_stmt =
    tx.prepare_cached("INSERT OR IGNORE INTO holiday_types (code) VALUES (?1)")?;
  let mut holiday_stmt = tx.prepare_cached(
    "INSERT INTO holidays (
       country_code, holiday_date, holiday_year, local_name, name,
       type_code, is_fixed, is_global, launch_year, created_at, updated_at
     ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?10)
     ON CONFLICT (country_code, holiday_date) DO NOTHING",
  )?;

  let mut inserted = 0;
  for h in holidays {
    if let Some(code) = &h.type_code {
      type_stmt.execute(rusqlite::params![code])?;
    }
    inserted += holiday_stmt.execute(rusqlite::params![
      h.country_code,
      encode_date(h.date),
      h.year(),
      h.local_name,
      h.name,
      h.type_code,
      h.fixed,
      h.global,
      h.launch_year,
      now,
    ])?;
  }
  Ok(inserted)
}

// ─── HolidayStore impl ───────────────────────────────────────────────────────

impl HolidayStore for SqliteStore {
  type Error = Error;

  // ── Countries and types ───────────────────────────────────────────────────

  async fn get_country(&self, code: &str) -> Result<Option<Country>> {
    let code = code.to_owned();

    let raw: Option<RawCountry> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              &format!("SELECT {} FROM countries WHERE code = ?1", RawCountry::COLUMNS),
              rusqlite::params![code],
              RawCountry::from_row,
            )
            .optional()?,
        )
      })
      .await?;

    raw.map(RawCountry::into_country).transpose()
  }

  async fn list_countries(&self) -> Result<Vec<Country>> {
    let raws: Vec<RawCountry> = self
      .conn
      .call(|conn| {
        let mut stmt = conn.prepare(&format!(
          "SELECT {} FROM countries ORDER BY code",
          RawCountry::COLUMNS
        ))?;
        let rows = stmt
          .query_map([], RawCountry::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawCountry::into_country).collect()
  }

  async fn get_holiday_type(&self, code: &str) -> Result<Option<HolidayType>> {
    let code = code.to_owned();

    let found: Option<String> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              "SELECT code FROM holiday_types WHERE code = ?1",
              rusqlite::params![code],
              |r| r.get(0),
            )
            .optional()?,
        )
      })
      .await?;

    Ok(found.map(|code| HolidayType { code }))
  }

  // ── Holidays — writes ─────────────────────────────────────────────────────

  async fn load_all(
    &self,
    countries: Vec<NewCountry>,
    holidays:  Vec<NewHoliday>,
  ) -> Result<usize> {
    let now = encode_dt(Utc::now());

    let inserted = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        insert_countries(&tx, &countries, &now)?;
        let inserted = insert_holidays(&tx, &holidays, &now)?;
        tx.commit()?;
        Ok(inserted)
      })
      .await?;

    Ok(inserted)
  }

  async fn replace_year(
    &self,
    year:      i32,
    countries: Vec<NewCountry>,
    holidays:  Vec<NewHoliday>,
  ) -> Result<usize> {
    let now = encode_dt(Utc::now());

    // `Err(code)` names a holiday whose country is not part of the call;
    // nothing is written.
    let inserted: std::result::Result<usize, String> = self
      .conn
      .call(move |conn| {
        if let Some(stray) = holidays
          .iter()
          .find(|h| !countries.iter().any(|c| c.code == h.country_code))
        {
          return Ok(Err(stray.country_code.clone()));
        }

        let tx = conn.transaction()?;
        insert_countries(&tx, &countries, &now)?;
        let mut removed = 0;
        {
          let mut delete = tx.prepare_cached(
            "DELETE FROM holidays WHERE country_code = ?1 AND holiday_year = ?2",
          )?;
          for c in &countries {
            removed += delete.execute(rusqlite::params![c.code, year])?;
          }
        }
        let inserted = insert_holidays(&tx, &holidays, &now)?;
        tx.commit()?;
        tracing::debug!(year, countries = countries.len(), removed, inserted, "replaced holidays");
        Ok(Ok(inserted))
      })
      .await?;

    inserted.map_err(Error::UnlistedCountry)
  }

  async fn delete_holidays(&self, country_code: &str, year: i32) -> Result<usize> {
    let code = country_code.to_owned();

    let removed = self
      .conn
      .call(move |conn| {
        Ok(conn.execute(
          "DELETE FROM holidays WHERE country_code = ?1 AND holiday_year = ?2",
          rusqlite::params![code, year],
        )?)
      })
      .await?;

    Ok(removed)
  }

  // ── Holidays — reads ──────────────────────────────────────────────────────

  async fn count_holidays(&self) -> Result<u64> {
    let count: i64 = self
      .conn
      .call(|conn| {
        Ok(conn.query_row("SELECT COUNT(*) FROM holidays", [], |r| r.get(0))?)
      })
      .await?;

    Ok(count.max(0) as u64)
  }

  async fn search(
    &self,
    query: &HolidayQuery,
    page:  PageRequest,
  ) -> Result<Page<Holiday>> {
    let Filter { where_clause, mut args } = Filter::from_query(query);
    let order    = order_by(page.sort);
    let limit    = i64::from(page.size);
    let offset   = i64::try_from(page.offset()).unwrap_or(i64::MAX);

    let (total, raws): (i64, Vec<RawHoliday>) = self
      .conn
      .call(move |conn| {
        let total: i64 = conn.query_row(
          &format!("SELECT COUNT(*) FROM holidays h {where_clause}"),
          rusqlite::params_from_iter(args.iter()),
          |r| r.get(0),
        )?;

        args.push(limit.into());
        args.push(offset.into());
        let sql = format!(
          "SELECT {columns}
           FROM holidays h
           JOIN countries c ON c.code = h.country_code
           {where_clause}
           {order}
           LIMIT ?{limit_idx} OFFSET ?{offset_idx}",
          columns    = RawHoliday::COLUMNS,
          limit_idx  = args.len() - 1,
          offset_idx = args.len(),
        );

        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt
          .query_map(rusqlite::params_from_iter(args.iter()), RawHoliday::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok((total, rows))
      })
      .await?;

    let content = raws
      .into_iter()
      .map(RawHoliday::into_holiday)
      .collect::<Result<Vec<_>>>()?;

    Ok(Page {
      content,
      page: page.page,
      size: page.size,
      total_elements: total.max(0) as u64,
    })
  }
}
