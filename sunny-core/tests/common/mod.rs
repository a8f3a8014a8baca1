//! Test helpers: an in-process provider with configurable answers and delays.

#![allow(dead_code)]

use async_trait::async_trait;
use std::{
    collections::HashMap,
    sync::{
        Arc,
        atomic::{AtomicBool, AtomicUsize, Ordering},
    },
    time::Duration,
};

use sunny_core::{
    PlaceStore, Repository, Result, WeatherError, WeatherProvider,
    model::{
        AirQuality, Aqi, DailyForecast, DailyResponse, DailyResult, LifeDescription, LifeIndex,
        Location, Place, PlaceSearchResult, RealtimeResponse, RealtimeResult, RealtimeWeather,
        SkyconEntry, TemperatureRange,
    },
};

/// How one weather endpoint behaves.
#[derive(Debug, Clone)]
pub enum Reply {
    Status(&'static str),
    Transport,
    Panic,
}

#[derive(Debug, Clone)]
pub struct Leg {
    pub reply: Reply,
    pub delay: Duration,
}

impl Leg {
    pub fn ok() -> Self {
        Self::status("ok")
    }

    pub fn status(status: &'static str) -> Self {
        Self {
            reply: Reply::Status(status),
            delay: Duration::ZERO,
        }
    }

    pub fn transport() -> Self {
        Self {
            reply: Reply::Transport,
            delay: Duration::ZERO,
        }
    }

    pub fn panic() -> Self {
        Self {
            reply: Reply::Panic,
            delay: Duration::ZERO,
        }
    }

    pub fn after(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    async fn settle(&self, endpoint: &'static str) -> Result<&'static str> {
        tokio::time::sleep(self.delay).await;
        match self.reply {
            Reply::Status(status) => Ok(status),
            Reply::Transport => Err(WeatherError::Http {
                endpoint,
                status: 503,
                body: "service unavailable".into(),
            }),
            Reply::Panic => panic!("{endpoint} leg blew up"),
        }
    }
}

#[derive(Debug)]
pub struct FakeProvider {
    pub places: Vec<Place>,
    pub search_status: &'static str,
    pub search_delays: HashMap<String, Duration>,
    pub realtime: Leg,
    pub daily: Leg,
    pub forecast: DailyForecast,
    pub search_calls: AtomicUsize,
    pub realtime_done: AtomicBool,
    pub daily_done: AtomicBool,
}

impl Default for FakeProvider {
    fn default() -> Self {
        Self {
            places: vec![beijing(), place("Shanghai", "121.47", "31.23")],
            search_status: "ok",
            search_delays: HashMap::new(),
            realtime: Leg::ok(),
            daily: Leg::ok(),
            forecast: daily_forecast(),
            search_calls: AtomicUsize::new(0),
            realtime_done: AtomicBool::new(false),
            daily_done: AtomicBool::new(false),
        }
    }
}

impl FakeProvider {
    pub fn with_legs(realtime: Leg, daily: Leg) -> Self {
        Self {
            realtime,
            daily,
            ..Self::default()
        }
    }
}

#[async_trait]
impl WeatherProvider for FakeProvider {
    async fn search_places(&self, query: &str) -> Result<PlaceSearchResult> {
        self.search_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.search_delays.get(query) {
            tokio::time::sleep(*delay).await;
        }

        Ok(PlaceSearchResult {
            status: self.search_status.to_string(),
            places: self
                .places
                .iter()
                .filter(|p| p.name.contains(query))
                .cloned()
                .collect(),
        })
    }

    async fn realtime_weather(&self, _lng: &str, _lat: &str) -> Result<RealtimeResponse> {
        let outcome = self.realtime.settle("realtime weather").await;
        self.realtime_done.store(true, Ordering::SeqCst);
        let status = outcome?;

        Ok(RealtimeResponse {
            status: status.to_string(),
            result: (status == "ok").then(|| RealtimeResult {
                realtime: realtime_weather(),
            }),
        })
    }

    async fn daily_weather(&self, _lng: &str, _lat: &str) -> Result<DailyResponse> {
        let outcome = self.daily.settle("daily weather").await;
        self.daily_done.store(true, Ordering::SeqCst);
        let status = outcome?;

        Ok(DailyResponse {
            status: status.to_string(),
            result: (status == "ok").then(|| DailyResult {
                daily: self.forecast.clone(),
            }),
        })
    }
}

pub fn place(name: &str, lng: &str, lat: &str) -> Place {
    Place {
        name: name.to_string(),
        location: Location::new(lng, lat),
        address: format!("{name}, China"),
    }
}

pub fn beijing() -> Place {
    place("Beijing", "116.40", "39.90")
}

pub fn realtime_weather() -> RealtimeWeather {
    RealtimeWeather {
        sky_condition: "CLEAR_DAY".into(),
        temperature: 23.4,
        air_quality: AirQuality {
            aqi: Aqi { china_index: 38.0 },
        },
    }
}

pub fn daily_forecast() -> DailyForecast {
    let desc = |d: &str| {
        vec![LifeDescription {
            description: d.to_string(),
        }]
    };

    DailyForecast {
        sky_condition: vec![SkyconEntry {
            date: "2024-05-01T00:00+08:00".into(),
            value: "LIGHT_RAIN".into(),
        }],
        temperature: vec![TemperatureRange {
            min: 14.0,
            max: 25.0,
        }],
        life_index: LifeIndex {
            cold_risk: desc("少发"),
            dressing: desc("舒适"),
            ultraviolet: desc("弱"),
            car_washing: desc("不宜"),
        },
    }
}

pub fn repository(provider: FakeProvider) -> (Arc<FakeProvider>, Arc<Repository>) {
    let provider = Arc::new(provider);
    let dyn_provider: Arc<dyn WeatherProvider> = provider.clone();
    let repository = Arc::new(Repository::new(dyn_provider, PlaceStore::in_memory()));
    (provider, repository)
}
