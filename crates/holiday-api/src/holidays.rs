//! Handlers for `/holidays` endpoints.
//!
//! | Method   | Path | Notes |
//! |----------|------|-------|
//! | `GET`    | `/holidays` | Optional `year`, `countryCode`, `from`, `to`, `typeCode`, `page`, `size`, `sort` |
//! | `POST`   | `/holidays/refresh` | `?year&countryCode` required; 204 |
//! | `DELETE` | `/holidays` | `?year&countryCode` required; 204 |

use axum::{
  Json,
  extract::{Query, State},
  http::StatusCode,
};
use chrono::NaiveDate;
use holiday_core::{
  holiday::Holiday,
  provider::HolidayProvider,
  query::{HolidayQuery, Page, PageRequest, Sort, DEFAULT_PAGE_SIZE},
  store::HolidayStore,
};
use holiday_sync::HolidayService;
use serde::{Deserialize, Serialize};

use crate::error::ApiError;

// ─── Response bodies ──────────────────────────────────────────────────────────

/// One holiday as returned by `GET /holidays`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HolidayResponse {
  pub id:           i64,
  pub country_code: String,
  pub country_name: String,
  pub date:         NaiveDate,
  pub year:         i32,
  pub local_name:   String,
  pub name:         String,
  pub type_code:    Option<String>,
  pub fixed:        bool,
  pub global:       bool,
  pub launch_year:  Option<i32>,
}

impl From<Holiday> for HolidayResponse {
  fn from(h: Holiday) -> Self {
    Self {
      id:           h.id,
      country_code: h.country_code,
      country_name: h.country_name,
      date:         h.date,
      year:         h.year,
      local_name:   h.local_name,
      name:         h.name,
      type_code:    h.type_code,
      fixed:        h.fixed,
      global:       h.global,
      launch_year:  h.launch_year,
    }
  }
}

/// A zero-based page of results.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageResponse<T> {
  pub content:        Vec<T>,
  pub page:           u32,
  pub size:           u32,
  pub total_elements: u64,
  pub total_pages:    u64,
}

impl<T> PageResponse<T> {
  fn from_page<U: Into<T>>(page: Page<U>) -> Self {
    let total_pages = page.total_pages();
    let page = page.map(Into::into);
    Self {
      content: page.content,
      page: page.page,
      size: page.size,
      total_elements: page.total_elements,
      total_pages,
    }
  }
}

// ─── Search ───────────────────────────────────────────────────────────────────

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchParams {
  pub year:         Option<i32>,
  pub country_code: Option<String>,
  /// Inclusive, `YYYY-MM-DD`.
  pub from:         Option<NaiveDate>,
  /// Inclusive, `YYYY-MM-DD`.
  pub to:           Option<NaiveDate>,
  pub type_code:    Option<String>,
  /// Zero-based page index. Default 0.
  pub page:         Option<u32>,
  /// Default 20, at most 2000.
  pub size:         Option<u32>,
  /// `field[,asc|desc]`; defaults to `date,asc`.
  pub sort:         Option<String>,
}

/// `GET /holidays[?year=..][&countryCode=..][&from=..][&to=..][&typeCode=..][&page=..][&size=..][&sort=..]`
pub async fn search<S, P>(
  State(service): State<HolidayService<S, P>>,
  Query(params): Query<SearchParams>,
) -> Result<Json<PageResponse<HolidayResponse>>, ApiError>
where
  S: HolidayStore,
  P: HolidayProvider,
{
  let sort = match params.sort.as_deref().map(str::trim) {
    None | Some("") => Sort::default(),
    Some(s) => s.parse().map_err(holiday_sync::Error::from)?,
  };
  let page = PageRequest::new(
    params.page.unwrap_or(0),
    params.size.unwrap_or(DEFAULT_PAGE_SIZE),
  )
  .with_sort(sort);

  let query = HolidayQuery {
    year:         params.year,
    country_code: params.country_code,
    from:         params.from,
    to:           params.to,
    type_code:    params.type_code,
  };

  let result = service.search(query, page).await?;
  Ok(Json(PageResponse::from_page(result)))
}

// ─── Refresh / delete ─────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct YearCountryParams {
  pub year:         i32,
  pub country_code: String,
}

/// `POST /holidays/refresh?year=..&countryCode=..` — 204 on success.
pub async fn refresh<S, P>(
  State(service): State<HolidayService<S, P>>,
  Query(params): Query<YearCountryParams>,
) -> Result<StatusCode, ApiError>
where
  S: HolidayStore,
  P: HolidayProvider,
{
  service.refresh(params.year, &params.country_code).await?;
  Ok(StatusCode::NO_CONTENT)
}

/// `DELETE /holidays?year=..&countryCode=..` — 204 on success.
pub async fn delete<S, P>(
  State(service): State<HolidayService<S, P>>,
  Query(params): Query<YearCountryParams>,
) -> Result<StatusCode, ApiError>
where
  S: HolidayStore,
  P: HolidayProvider,
{
  service
    .delete_year_country(params.year, &params.country_code)
    .await?;
  Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
  use std::sync::{
    Arc,
    atomic::{AtomicUsize, Ordering},
  };

  use axum::{
    Router,
    body::Body,
    http::{Request, Response},
  };
  use holiday_core::{
    provider::{ProviderCountry, ProviderHoliday},
    years::SupportedYears,
  };
  use holiday_store_sqlite::SqliteStore;
  use serde_json::Value;
  use tower::ServiceExt as _;

  use super::*;
  use crate::api_router;

  #[derive(Debug, thiserror::Error)]
  #[error("provider unavailable")]
  struct Unavailable;

  /// Korea and the US, with New Year's Day and one extra holiday per year.
  /// Refreshes after the initial load report a changed 2025 Korean calendar.
  #[derive(Default)]
  struct StaticProvider {
    holiday_calls: AtomicUsize,
  }

  fn holiday(date: NaiveDate, name: &str, code: &str, types: &[&str]) -> ProviderHoliday {
    ProviderHoliday {
      date,
      local_name: name.into(),
      name: name.into(),
      country_code: code.into(),
      fixed: true,
      global: true,
      launch_year: None,
      types: Some(types.iter().map(|t| (*t).to_owned()).collect()),
    }
  }

  impl HolidayProvider for StaticProvider {
    type Error = Unavailable;

    async fn available_countries(&self) -> Result<Vec<ProviderCountry>, Unavailable> {
      Ok(vec![
        ProviderCountry { country_code: "KR".into(), name: "Korea (Republic of)".into() },
        ProviderCountry { country_code: "US".into(), name: "United States".into() },
      ])
    }

    async fn public_holidays(
      &self,
      year: i32,
      code: &str,
    ) -> Result<Vec<ProviderHoliday>, Unavailable> {
      let call = self.holiday_calls.fetch_add(1, Ordering::SeqCst);
      let d = |m, day| NaiveDate::from_ymd_opt(year, m, day).unwrap();
      if code == "FAIL" {
        return Err(Unavailable);
      }
      // 12 calls make up the initial load (2 countries × 6 years).
      if call >= 12 && year == 2025 && code == "KR" {
        return Ok(vec![holiday(d(2, 1), "New Holiday", code, &["Public"])]);
      }
      Ok(vec![
        holiday(d(1, 1), "New Year's Day", code, &["Public"]),
        holiday(d(7, 4), "Midsummer", code, &["Observance", "Public"]),
      ])
    }
  }

  async fn app() -> Router {
    let service = HolidayService::new(
      Arc::new(SqliteStore::open_in_memory().await.unwrap()),
      Arc::new(StaticProvider::default()),
      SupportedYears::default(),
    );
    service.initial_load().await.unwrap();
    Router::new().nest("/api", api_router(service))
  }

  async fn send(app: &Router, method: &str, uri: &str) -> Response<Body> {
    let req = Request::builder()
      .method(method)
      .uri(uri)
      .body(Body::empty())
      .unwrap();
    app.clone().oneshot(req).await.unwrap()
  }

  async fn json(resp: Response<Body>) -> Value {
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
  }

  // ── GET /holidays ───────────────────────────────────────────────────────────

  #[tokio::test]
  async fn search_defaults_to_first_page_of_twenty() {
    let app = app().await;
    let resp = send(&app, "GET", "/api/holidays").await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body = json(resp).await;
    assert_eq!(body["totalElements"], 24);
    assert_eq!(body["totalPages"], 2);
    assert_eq!(body["page"], 0);
    assert_eq!(body["size"], 20);
    assert_eq!(body["content"].as_array().unwrap().len(), 20);
    assert_eq!(body["content"][0]["date"], "2020-01-01");
  }

  #[tokio::test]
  async fn search_returns_camel_case_records() {
    let app = app().await;
    let resp = send(&app, "GET", "/api/holidays?year=2025&countryCode=kr&typeCode=Public").await;
    let body = json(resp).await;

    // Midsummer's first type is Observance.
    assert_eq!(body["totalElements"], 1);
    let h = &body["content"][0];
    assert_eq!(h["countryCode"], "KR");
    assert_eq!(h["countryName"], "Korea (Republic of)");
    assert_eq!(h["date"], "2025-01-01");
    assert_eq!(h["year"], 2025);
    assert_eq!(h["localName"], "New Year's Day");
    assert_eq!(h["typeCode"], "Public");
    assert_eq!(h["fixed"], true);
    assert_eq!(h["global"], true);
    assert!(h["launchYear"].is_null());
    assert!(h["id"].is_i64());
  }

  #[tokio::test]
  async fn search_date_range_and_sort() {
    let app = app().await;
    let resp = send(
      &app,
      "GET",
      "/api/holidays?from=2024-01-01&to=2024-12-31&sort=countryCode,desc&size=3",
    )
    .await;
    let body = json(resp).await;

    assert_eq!(body["totalElements"], 4);
    assert_eq!(body["size"], 3);
    assert_eq!(body["content"][0]["countryCode"], "US");
    assert_eq!(body["content"][2]["countryCode"], "KR");
  }

  #[tokio::test]
  async fn search_rejects_unknown_sort_field() {
    let app = app().await;
    let resp = send(&app, "GET", "/api/holidays?sort=launchYear").await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert!(json(resp).await["error"].as_str().unwrap().contains("launchYear"));
  }

  #[tokio::test]
  async fn search_rejects_malformed_date() {
    let app = app().await;
    let resp = send(&app, "GET", "/api/holidays?from=01/01/2025").await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
  }

  // ── POST /holidays/refresh ──────────────────────────────────────────────────

  #[tokio::test]
  async fn refresh_returns_204_and_replaces_rows() {
    let app = app().await;
    let resp = send(&app, "POST", "/api/holidays/refresh?year=2025&countryCode=KR").await;
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);

    let body = json(send(&app, "GET", "/api/holidays?year=2025&countryCode=KR").await).await;
    assert_eq!(body["totalElements"], 1);
    assert_eq!(body["content"][0]["date"], "2025-02-01");
    assert_eq!(body["content"][0]["name"], "New Holiday");
  }

  #[tokio::test]
  async fn refresh_out_of_range_year_is_bad_request() {
    let app = app().await;
    let resp = send(&app, "POST", "/api/holidays/refresh?year=2019&countryCode=KR").await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body = json(resp).await;
    assert!(body["error"].as_str().unwrap().contains("2019"));
  }

  #[tokio::test]
  async fn refresh_unknown_country_is_not_found() {
    let app = app().await;
    let resp = send(&app, "POST", "/api/holidays/refresh?year=2025&countryCode=ZZ").await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
  }

  #[tokio::test]
  async fn refresh_requires_parameters() {
    let app = app().await;
    let resp = send(&app, "POST", "/api/holidays/refresh?year=2025").await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
  }

  // ── DELETE /holidays ────────────────────────────────────────────────────────

  #[tokio::test]
  async fn delete_returns_204_and_removes_rows() {
    let app = app().await;
    let resp = send(&app, "DELETE", "/api/holidays?year=2023&countryCode=us").await;
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);

    let body = json(send(&app, "GET", "/api/holidays?year=2023").await).await;
    assert_eq!(body["totalElements"], 2);
    assert!(
      body["content"]
        .as_array()
        .unwrap()
        .iter()
        .all(|h| h["countryCode"] == "KR")
    );
  }

  #[tokio::test]
  async fn delete_out_of_range_year_is_bad_request() {
    let app = app().await;
    let resp = send(&app, "DELETE", "/api/holidays?year=2026&countryCode=KR").await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body = json(send(&app, "GET", "/api/holidays").await).await;
    assert_eq!(body["totalElements"], 24);
  }
}
