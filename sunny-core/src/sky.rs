//! Categorical sky conditions ("skycon") reported by the weather API.

/// Sky condition; only built through [`Skycon::from_code`], which never fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Skycon {
    #[default]
    ClearDay,
    ClearNight,
    PartlyCloudyDay,
    PartlyCloudyNight,
    Cloudy,
    Wind,
    LightRain,
    ModerateRain,
    HeavyRain,
    StormRain,
    ThunderShower,
    Sleet,
    LightSnow,
    ModerateSnow,
    HeavySnow,
    StormSnow,
    Hail,
    LightHaze,
    ModerateHaze,
    HeavyHaze,
    Fog,
    Dust,
}

impl Skycon {
    /// Map an API code such as `"PARTLY_CLOUDY_NIGHT"`. Unknown codes read as clear day.
    pub fn from_code(code: &str) -> Self {
        match code {
            "CLEAR_DAY" => Self::ClearDay,
            "CLEAR_NIGHT" => Self::ClearNight,
            "PARTLY_CLOUDY_DAY" => Self::PartlyCloudyDay,
            "PARTLY_CLOUDY_NIGHT" => Self::PartlyCloudyNight,
            "CLOUDY" => Self::Cloudy,
            "WIND" => Self::Wind,
            "LIGHT_RAIN" => Self::LightRain,
            "MODERATE_RAIN" => Self::ModerateRain,
            "HEAVY_RAIN" => Self::HeavyRain,
            "STORM_RAIN" => Self::StormRain,
            "THUNDER_SHOWER" => Self::ThunderShower,
            "SLEET" => Self::Sleet,
            "LIGHT_SNOW" => Self::LightSnow,
            "MODERATE_SNOW" => Self::ModerateSnow,
            "HEAVY_SNOW" => Self::HeavySnow,
            "STORM_SNOW" => Self::StormSnow,
            "HAIL" => Self::Hail,
            "LIGHT_HAZE" => Self::LightHaze,
            "MODERATE_HAZE" => Self::ModerateHaze,
            "HEAVY_HAZE" => Self::HeavyHaze,
            "FOG" => Self::Fog,
            "DUST" => Self::Dust,
            _ => Self::ClearDay,
        }
    }

    /// Display text, in the language the API is queried with.
    pub fn info(&self) -> &'static str {
        match self {
            Self::ClearDay | Self::ClearNight => "晴",
            Self::PartlyCloudyDay | Self::PartlyCloudyNight => "多云",
            Self::Cloudy => "阴",
            Self::Wind => "大风",
            Self::LightRain => "小雨",
            Self::ModerateRain => "中雨",
            Self::HeavyRain => "大雨",
            Self::StormRain => "暴雨",
            Self::ThunderShower => "雷阵雨",
            Self::Sleet => "雨夹雪",
            Self::LightSnow => "小雪",
            Self::ModerateSnow => "中雪",
            Self::HeavySnow => "大雪",
            Self::StormSnow => "暴雪",
            Self::Hail => "冰雹",
            Self::LightHaze => "轻度雾霾",
            Self::ModerateHaze => "中度雾霾",
            Self::HeavyHaze => "重度雾霾",
            Self::Fog => "雾",
            Self::Dust => "浮尘",
        }
    }
}

impl std::fmt::Display for Skycon {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.info())
    }
}
