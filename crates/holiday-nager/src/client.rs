//! [`NagerClient`] — the `reqwest` implementation of [`HolidayProvider`].

use std::time::Duration;

use holiday_core::provider::{HolidayProvider, ProviderCountry, ProviderHoliday};
use reqwest::Client;
use serde::{Deserialize, de::DeserializeOwned};

use crate::{Error, Result};

pub const DEFAULT_BASE_URL: &str = "https://date.nager.at/api/v3";

/// Connection settings for the provider.
#[derive(Debug, Clone, Deserialize)]
pub struct NagerConfig {
  #[serde(default = "default_base_url")]
  pub base_url:     String,
  #[serde(default = "default_timeout_secs")]
  pub timeout_secs: u64,
}

fn default_base_url() -> String { DEFAULT_BASE_URL.to_owned() }

fn default_timeout_secs() -> u64 { 30 }

impl Default for NagerConfig {
  fn default() -> Self {
    Self {
      base_url:     default_base_url(),
      timeout_secs: default_timeout_secs(),
    }
  }
}

/// Async HTTP client for the Nager.Date API.
///
/// Cheap to clone — the inner [`reqwest::Client`] is `Arc`-based.
#[derive(Clone)]
pub struct NagerClient {
  client:   Client,
  base_url: String,
}

impl NagerClient {
  pub fn new(config: NagerConfig) -> Result<Self> {
    let client = Client::builder()
      .timeout(Duration::from_secs(config.timeout_secs))
      .build()
      .map_err(Error::Client)?;
    Ok(Self {
      client,
      base_url: config.base_url.trim_end_matches('/').to_owned(),
    })
  }

  pub fn base_url(&self) -> &str { &self.base_url }

  /// `GET {base}{path}` and decode the JSON body.
  async fn get_json<T: DeserializeOwned>(&self, path: String) -> Result<T> {
    tracing::debug!(%path, "provider request");

    let resp = self
      .client
      .get(format!("{}{path}", self.base_url))
      .send()
      .await
      .map_err(|source| Error::Http { path: path.clone(), source })?;

    let status = resp.status();
    if !status.is_success() {
      return Err(Error::Status { path, status });
    }

    let body = resp
      .bytes()
      .await
      .map_err(|source| Error::Http { path: path.clone(), source })?;

    serde_json::from_slice(&body).map_err(|source| Error::Decode { path, source })
  }
}

impl HolidayProvider for NagerClient {
  type Error = Error;

  /// `GET /AvailableCountries`
  async fn available_countries(&self) -> Result<Vec<ProviderCountry>> {
    self.get_json("/AvailableCountries".to_owned()).await
  }

  /// `GET /PublicHolidays/{year}/{countryCode}`
  async fn public_holidays(
    &self,
    year:         i32,
    country_code: &str,
  ) -> Result<Vec<ProviderHoliday>> {
    self
      .get_json(format!("/PublicHolidays/{year}/{country_code}"))
      .await
  }
}

#[cfg(test)]
mod tests {
  use axum::{
    Router,
    extract::Path,
    http::StatusCode,
    response::IntoResponse,
    routing::get,
  };
  use chrono::NaiveDate;
  use tokio::net::TcpListener;

  use super::*;

  async fn countries() -> impl IntoResponse {
    (
      [("content-type", "application/json")],
      r#"[{"countryCode":"KR","name":"South Korea"},{"countryCode":"US","name":"United States"}]"#,
    )
  }

  async fn holidays(Path((year, code)): Path<(i32, String)>) -> axum::response::Response {
    match code.as_str() {
      "KR" => (
        [("content-type", "application/json")],
        format!(
          r#"[{{"date":"{year}-01-01","localName":"새해","name":"New Year's Day",
               "countryCode":"KR","fixed":false,"global":true,"counties":null,
               "launchYear":1949,"types":["Public","Bank"]}}]"#
        ),
      )
        .into_response(),
      "XX" => ([("content-type", "application/json")], "{not json").into_response(),
      _ => StatusCode::NOT_FOUND.into_response(),
    }
  }

  /// Serve a fake provider on an ephemeral port and return a client for it.
  async fn client() -> NagerClient {
    let app = Router::new()
      .route("/api/v3/AvailableCountries", get(countries))
      .route("/api/v3/PublicHolidays/{year}/{code}", get(holidays));
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move { axum::serve(listener, app).await.unwrap() });

    NagerClient::new(NagerConfig {
      base_url:     format!("http://{addr}/api/v3/"),
      timeout_secs: 5,
    })
    .unwrap()
  }

  #[tokio::test]
  async fn lists_available_countries() {
    let c = client().await;
    let countries = c.available_countries().await.unwrap();
    assert_eq!(countries.len(), 2);
    assert_eq!(countries[0].country_code, "KR");
    assert_eq!(countries[1].name, "United States");
  }

  #[tokio::test]
  async fn fetches_public_holidays() {
    let c = client().await;
    let holidays = c.public_holidays(2025, "KR").await.unwrap();
    assert_eq!(holidays.len(), 1);
    let h = &holidays[0];
    assert_eq!(h.date, NaiveDate::from_ymd_opt(2025, 1, 1).unwrap());
    assert_eq!(h.local_name, "새해");
    assert_eq!(h.launch_year, Some(1949));
    assert_eq!(h.first_type(), Some("Public"));
  }

  #[tokio::test]
  async fn non_success_status_is_an_error() {
    let c = client().await;
    let err = c.public_holidays(2025, "ZZ").await.unwrap_err();
    assert!(
      matches!(err, Error::Status { ref path, status } if path == "/PublicHolidays/2025/ZZ" && status == StatusCode::NOT_FOUND),
      "unexpected error: {err}"
    );
  }

  #[tokio::test]
  async fn malformed_body_is_an_error() {
    let c = client().await;
    let err = c.public_holidays(2025, "XX").await.unwrap_err();
    assert!(matches!(err, Error::Decode { .. }), "unexpected error: {err}");
  }

  #[test]
  fn trailing_slash_is_trimmed() {
    let c = NagerClient::new(NagerConfig {
      base_url: "https://example.test/api/v3/".into(),
      ..Default::default()
    })
    .unwrap();
    assert_eq!(c.base_url(), "https://example.test/api/v3");
  }
}
