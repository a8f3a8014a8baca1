use crate::{
    Config,
    error::Result,
    model::{DailyResponse, PlaceSearchResult, RealtimeResponse},
    provider::caiyun::CaiyunProvider,
};
use async_trait::async_trait;
use std::{fmt::Debug, sync::Arc};

pub mod caiyun;

/// Remote data source for place search and weather.
///
/// Each call is one network round trip with no retry; a failed attempt is
/// returned to the caller as is.
#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    async fn search_places(&self, query: &str) -> Result<PlaceSearchResult>;

    async fn realtime_weather(&self, lng: &str, lat: &str) -> Result<RealtimeResponse>;

    async fn daily_weather(&self, lng: &str, lat: &str) -> Result<DailyResponse>;
}

/// Construct the provider described by `config`.
pub fn provider_from_config(config: &Config) -> anyhow::Result<Arc<dyn WeatherProvider>> {
    provider_with_token(config, config.token()?)
}

fn provider_with_token(
    config: &Config,
    token: String,
) -> anyhow::Result<Arc<dyn WeatherProvider>> {
    let provider = CaiyunProvider::builder(token)
        .base_url(config.base_url())
        .lang(config.lang())
        .timeout(config.timeout())
        .build()?;

    Ok(Arc::new(provider))
}
