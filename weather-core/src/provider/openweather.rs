use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use std::time::Duration;

use crate::{
    config::Credential,
    model::{FetchError, WeatherQuery, WeatherReport, WeatherResult},
};

use super::WeatherProvider;

pub const DEFAULT_ENDPOINT: &str = "https://api.openweathermap.org/data/2.5/weather";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(6);

/// OpenWeather "current weather by city name" client.
#[derive(Debug, Clone)]
pub struct OpenWeatherClient {
    credential: Credential,
    endpoint: String,
    http: Client,
}

impl OpenWeatherClient {
    pub fn new(credential: Credential) -> Result<Self> {
        Self::with_endpoint(credential, DEFAULT_ENDPOINT, DEFAULT_TIMEOUT)
    }

    pub fn with_endpoint(
        credential: Credential,
        endpoint: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self> {
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self { credential, endpoint: endpoint.into(), http })
    }

    async fn fetch_current(&self, city: &str) -> WeatherResult {
        tracing::debug!(city, endpoint = %self.endpoint, "requesting current weather");

        let res = self
            .http
            .get(&self.endpoint)
            .query(&[
                ("q", city),
                ("appid", self.credential.as_str()),
                ("units", "metric"),
            ])
            .send()
            .await
            .map_err(classify_transport)?;

        let status = res.status();
        let body = res.text().await.map_err(classify_transport)?;

        tracing::debug!(city, %status, "OpenWeather responded");

        classify_response(status, &body)
    }
}

#[async_trait]
impl WeatherProvider for OpenWeatherClient {
    async fn fetch(&self, query: &WeatherQuery) -> WeatherResult {
        let result = self.fetch_current(&query.city).await;

        if let Err(err) = &result {
            tracing::warn!(city = %query.city, kind = ?err.kind(), detail = ?err, "lookup failed");
        }

        result
    }
}

#[derive(Debug, Deserialize)]
struct OwMain {
    temp: f64,
    humidity: u8,
}

#[derive(Debug, Deserialize)]
struct OwWeather {
    description: String,
}

#[derive(Debug, Deserialize)]
struct OwCurrentResponse {
    name: String,
    main: OwMain,
    #[serde(default)]
    weather: Vec<OwWeather>,
    #[serde(default)]
    timezone: i32,
}

#[derive(Debug, Default, Deserialize)]
struct OwErrorBody {
    message: Option<String>,
}

/// Timeouts are checked first: reqwest may flag a connect timeout as both.
fn classify_transport(err: reqwest::Error) -> FetchError {
    if err.is_timeout() {
        FetchError::Timeout
    } else if err.is_connect() {
        FetchError::Network(err.to_string())
    } else {
        FetchError::Unknown(err.to_string())
    }
}

fn classify_response(status: StatusCode, body: &str) -> WeatherResult {
    match status {
        StatusCode::OK => parse_current(body),
        StatusCode::BAD_REQUEST => Err(FetchError::BadRequest),
        StatusCode::UNAUTHORIZED => Err(FetchError::Unauthorized),
        StatusCode::NOT_FOUND => {
            let message = serde_json::from_str::<OwErrorBody>(body)
                .unwrap_or_default()
                .message
                .filter(|m| !m.trim().is_empty())
                .unwrap_or_else(|| FetchError::DEFAULT_NOT_FOUND.to_string());
            Err(FetchError::NotFound(message))
        }
        StatusCode::TOO_MANY_REQUESTS => Err(FetchError::RateLimited),
        other => Err(FetchError::ServerError(other.as_u16())),
    }
}

fn parse_current(body: &str) -> WeatherResult {
    let parsed: OwCurrentResponse = serde_json::from_str(body).map_err(|e| {
        FetchError::Unknown(format!(
            "Failed to parse OpenWeather current JSON: {e} (body: {})",
            truncate_body(body)
        ))
    })?;

    let condition = parsed
        .weather
        .into_iter()
        .next()
        .map(|w| w.description)
        .unwrap_or_else(|| "unknown".to_string());

    Ok(WeatherReport {
        location_name: parsed.name,
        condition,
        temperature_c: parsed.main.temp,
        humidity_pct: parsed.main.humidity,
        utc_offset_secs: parsed.timezone,
    })
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}
