//! Plain-text rendering of view state.

use std::fmt::Write;

use chrono::Local;

use sunny_core::{Place, Skycon, Weather};

pub fn places(places: &[Place]) -> String {
    let mut out = String::new();
    for (i, place) in places.iter().enumerate() {
        let _ = writeln!(out, "{:>2}. {}  ({})", i + 1, place.name, place.address);
    }
    out
}

pub fn weather(place_name: &str, weather: &Weather) -> String {
    let realtime = &weather.realtime;
    let daily = &weather.daily;
    let mut out = String::new();

    let _ = writeln!(out, "{place_name}");
    let _ = writeln!(
        out,
        "  {}℃  {}  空气指数 {}",
        realtime.temperature as i32,
        Skycon::from_code(&realtime.sky_condition),
        realtime.air_quality.aqi.china_index as i32,
    );

    let _ = writeln!(out);
    let today = Local::now().date_naive();
    for day in daily.days() {
        let date = match day.sky.day() {
            Some(d) if d == today => "今天".to_string(),
            Some(d) => d.format("%Y-%m-%d").to_string(),
            None => day.sky.date.clone(),
        };
        let _ = writeln!(
            out,
            "  {date}  {:<6} {} ~ {}℃",
            Skycon::from_code(&day.sky.value).info(),
            day.temperature.min as i32,
            day.temperature.max as i32,
        );
    }

    if let Some(today) = daily.life_index.today() {
        let _ = writeln!(out);
        let _ = writeln!(out, "  感冒  {}", today.cold_risk);
        let _ = writeln!(out, "  穿衣  {}", today.dressing);
        let _ = writeln!(out, "  紫外线  {}", today.ultraviolet);
        let _ = writeln!(out, "  洗车  {}", today.car_washing);
    }

    out
}
