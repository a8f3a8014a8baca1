use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Serialize};

/// Status value the weather API uses for a successful payload.
pub const STATUS_OK: &str = "ok";

/// Coordinates exactly as the API sends them. Kept as text so a saved
/// place round-trips without losing digits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    pub lng: String,
    pub lat: String,
}

impl Location {
    pub fn new(lng: impl Into<String>, lat: impl Into<String>) -> Self {
        Self {
            lng: lng.into(),
            lat: lat.into(),
        }
    }
}

/// A named, geolocated search result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Place {
    pub name: String,
    pub location: Location,
    #[serde(rename = "formatted_address")]
    pub address: String,
}

/// Body of `GET /v2/place`.
#[derive(Debug, Clone, Deserialize)]
pub struct PlaceSearchResult {
    pub status: String,
    #[serde(default)]
    pub places: Vec<Place>,
}

impl PlaceSearchResult {
    pub fn is_ok(&self) -> bool {
        self.status == STATUS_OK
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Aqi {
    #[serde(rename = "chn")]
    pub china_index: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AirQuality {
    pub aqi: Aqi,
}

/// Current conditions at a location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RealtimeWeather {
    #[serde(rename = "skycon")]
    pub sky_condition: String,
    pub temperature: f32,
    #[serde(rename = "air_quality")]
    pub air_quality: AirQuality,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RealtimeResult {
    pub realtime: RealtimeWeather,
}

/// Body of `GET /v2/{token}/{lng},{lat}/realtime.json`.
///
/// `result` is absent when the API reports a failure status.
#[derive(Debug, Clone, Deserialize)]
pub struct RealtimeResponse {
    pub status: String,
    #[serde(default)]
    pub result: Option<RealtimeResult>,
}

impl RealtimeResponse {
    pub fn is_ok(&self) -> bool {
        self.status == STATUS_OK
    }

    pub fn into_realtime(self) -> Option<RealtimeWeather> {
        self.result.map(|r| r.realtime)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkyconEntry {
    pub date: String,
    pub value: String,
}

impl SkyconEntry {
    /// Calendar day of this entry; the API sends `2024-05-01T00:00+08:00`.
    pub fn day(&self) -> Option<NaiveDate> {
        DateTime::parse_from_str(&self.date, "%Y-%m-%dT%H:%M%:z")
            .or_else(|_| DateTime::parse_from_rfc3339(&self.date))
            .map(|dt| dt.date_naive())
            .ok()
            .or_else(|| NaiveDate::parse_from_str(self.date.get(..10)?, "%Y-%m-%d").ok())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TemperatureRange {
    pub min: f32,
    pub max: f32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LifeDescription {
    #[serde(rename = "desc")]
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LifeIndex {
    #[serde(alias = "cold_risk")]
    pub cold_risk: Vec<LifeDescription>,
    pub dressing: Vec<LifeDescription>,
    pub ultraviolet: Vec<LifeDescription>,
    #[serde(alias = "carwashing", alias = "car_washing")]
    pub car_washing: Vec<LifeDescription>,
}

/// Today's advisory text, one line per life index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TodayAdvice<'a> {
    pub cold_risk: &'a str,
    pub dressing: &'a str,
    pub ultraviolet: &'a str,
    pub car_washing: &'a str,
}

impl LifeIndex {
    /// Only index 0 is ever shown; later days are ignored.
    pub fn today(&self) -> Option<TodayAdvice<'_>> {
        Some(TodayAdvice {
            cold_risk: &self.cold_risk.first()?.description,
            dressing: &self.dressing.first()?.description,
            ultraviolet: &self.ultraviolet.first()?.description,
            car_washing: &self.car_washing.first()?.description,
        })
    }
}

/// Multi-day forecast. `sky_condition` and `temperature` are aligned by day index.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyForecast {
    #[serde(rename = "skycon")]
    pub sky_condition: Vec<SkyconEntry>,
    pub temperature: Vec<TemperatureRange>,
    #[serde(rename = "life_index")]
    pub life_index: LifeIndex,
}

/// One forecast row: the day's sky entry and its temperature range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ForecastDay<'a> {
    pub sky: &'a SkyconEntry,
    pub temperature: TemperatureRange,
}

impl DailyForecast {
    pub fn is_aligned(&self) -> bool {
        self.sky_condition.len() == self.temperature.len()
    }

    /// Pairs sky and temperature entries by index, stopping at the shorter list.
    pub fn days(&self) -> impl Iterator<Item = ForecastDay<'_>> {
        self.sky_condition
            .iter()
            .zip(self.temperature.iter().copied())
            .map(|(sky, temperature)| ForecastDay { sky, temperature })
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct DailyResult {
    pub daily: DailyForecast,
}

/// Body of `GET /v2/{token}/{lng},{lat}/daily.json`.
#[derive(Debug, Clone, Deserialize)]
pub struct DailyResponse {
    pub status: String,
    #[serde(default)]
    pub result: Option<DailyResult>,
}

impl DailyResponse {
    pub fn is_ok(&self) -> bool {
        self.status == STATUS_OK
    }

    pub fn into_daily(self) -> Option<DailyForecast> {
        self.result.map(|r| r.daily)
    }
}

/// Realtime conditions plus the daily forecast for one location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Weather {
    pub realtime: RealtimeWeather,
    pub daily: DailyForecast,
}
