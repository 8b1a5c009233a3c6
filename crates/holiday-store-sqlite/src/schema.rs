//! SQL schema for the holiday SQLite store.
//!
//! Executed once at connection startup. Future migrations will be gated on
//! `PRAGMA user_version`.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;
PRAGMA foreign_keys = ON;

CREATE TABLE IF NOT EXISTS countries (
    code        TEXT PRIMARY KEY CHECK (length(code) = 2),
    name        TEXT NOT NULL,
    region      TEXT,
    created_at  TEXT NOT NULL,   -- RFC 3339 UTC
    updated_at  TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS holiday_types (
    code        TEXT PRIMARY KEY
);

-- Rows are never updated in place; a refresh deletes and re-inserts a
-- whole (country, year).
CREATE TABLE IF NOT EXISTS holidays (
    id            INTEGER PRIMARY KEY AUTOINCREMENT,
    country_code  TEXT    NOT NULL REFERENCES countries(code),
    holiday_date  TEXT    NOT NULL,   -- YYYY-MM-DD
    holiday_year  INTEGER NOT NULL,
    local_name    TEXT    NOT NULL,
    name          TEXT    NOT NULL,
    type_code     TEXT    REFERENCES holiday_types(code),
    is_fixed      INTEGER NOT NULL,
    is_global     INTEGER NOT NULL,
    launch_year   INTEGER,
    created_at    TEXT    NOT NULL,
    updated_at    TEXT    NOT NULL,
    UNIQUE (country_code, holiday_date),
    CHECK  (holiday_year = CAST(substr(holiday_date, 1, 4) AS INTEGER))
);

CREATE INDEX IF NOT EXISTS holidays_country_year_idx ON holidays(country_code, holiday_year);
CREATE INDEX IF NOT EXISTS holidays_date_idx         ON holidays(holiday_date);
CREATE INDEX IF NOT EXISTS holidays_type_idx         ON holidays(type_code);

PRAGMA user_version = 1;
";
