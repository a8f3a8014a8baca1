use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::debug;

use crate::{
    config::{DEFAULT_BASE_URL, DEFAULT_LANG, DEFAULT_TIMEOUT_SECS},
    error::{Result, WeatherError},
    model::{DailyResponse, PlaceSearchResult, RealtimeResponse},
};

use super::WeatherProvider;

/// Client for the Caiyun weather API.
#[derive(Debug, Clone)]
pub struct CaiyunProvider {
    token: String,
    base_url: String,
    lang: String,
    http: Client,
}

#[derive(Debug)]
pub struct CaiyunProviderBuilder {
    token: String,
    base_url: String,
    lang: String,
    timeout: Duration,
}

impl CaiyunProviderBuilder {
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn lang(mut self, lang: impl Into<String>) -> Self {
        self.lang = lang.into();
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn build(self) -> Result<CaiyunProvider> {
        let http = Client::builder().timeout(self.timeout).build()?;

        Ok(CaiyunProvider {
            token: self.token,
            base_url: self.base_url.trim_end_matches('/').to_string(),
            lang: self.lang,
            http,
        })
    }
}

impl CaiyunProvider {
    pub fn builder(token: impl Into<String>) -> CaiyunProviderBuilder {
        CaiyunProviderBuilder {
            token: token.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            lang: DEFAULT_LANG.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }

    fn weather_url(&self, lng: &str, lat: &str, resource: &str) -> String {
        format!("{}/v2/{}/{lng},{lat}/{resource}", self.base_url, self.token)
    }

    async fn fetch<T: DeserializeOwned>(
        &self,
        endpoint: &'static str,
        request: RequestBuilder,
    ) -> Result<T> {
        let res = request.send().await?;

        let status = res.status();
        let body = res.text().await?;
        debug!(endpoint, %status, bytes = body.len(), "weather api responded");

        if !status.is_success() {
            return Err(WeatherError::Http {
                endpoint,
                status: status.as_u16(),
                body: truncate_body(&body),
            });
        }

        if body.trim().is_empty() {
            return Err(WeatherError::EmptyBody);
        }

        serde_json::from_str(&body).map_err(|e| WeatherError::parse(endpoint, e))
    }
}

#[async_trait]
impl WeatherProvider for CaiyunProvider {
    async fn search_places(&self, query: &str) -> Result<PlaceSearchResult> {
        let url = format!("{}/v2/place", self.base_url);

        let request = self.http.get(url).query(&[
            ("query", query),
            ("token", self.token.as_str()),
            ("lang", self.lang.as_str()),
        ]);

        self.fetch("place search", request).await
    }

    async fn realtime_weather(&self, lng: &str, lat: &str) -> Result<RealtimeResponse> {
        let request = self.http.get(self.weather_url(lng, lat, "realtime.json"));
        self.fetch("realtime weather", request).await
    }

    async fn daily_weather(&self, lng: &str, lat: &str) -> Result<DailyResponse> {
        let request = self.http.get(self.weather_url(lng, lat, "daily.json"));
        self.fetch("daily weather", request).await
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((cut, _)) => format!("{}...", &body[..cut]),
        None => body.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_trailing_slash_is_trimmed() {
        let provider = CaiyunProvider::builder("TOKEN")
            .base_url("http://localhost:8080/")
            .build()
            .unwrap();

        assert_eq!(
            provider.weather_url("116.40", "39.90", "daily.json"),
            "http://localhost:8080/v2/TOKEN/116.40,39.90/daily.json"
        );
    }

    #[test]
    fn truncate_body_respects_char_boundaries() {
        let long = "天".repeat(300);
        let cut = truncate_body(&long);
        assert!(cut.ends_with("..."));
        assert_eq!(cut.chars().count(), 203);

        assert_eq!(truncate_body("short"), "short");
    }
}
