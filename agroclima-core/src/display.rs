//! Classifiers and formatters shared by whatever front end draws the cards.

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime};
use serde::Serialize;

/// Coarse sky condition derived from the upstream WMO weather code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum WeatherCategory {
    Clear,
    PartlyCloudy,
    Cloudy,
    Rain,
    Snow,
    Wind,
}

impl WeatherCategory {
    pub fn from_code(code: i32) -> Self {
        match code {
            0 => Self::Clear,
            c if c <= 2 => Self::PartlyCloudy,
            c if c <= 45 => Self::Cloudy,
            c if c <= 67 => Self::Rain,
            c if c <= 86 => Self::Snow,
            _ => Self::Wind,
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::Clear => "Céu limpo",
            Self::PartlyCloudy => "Parcialmente nublado",
            Self::Cloudy => "Nublado",
            Self::Rain => "Chuva",
            Self::Snow => "Neve",
            Self::Wind => "Vento",
        }
    }
}

/// Which icon a detail line gets, picked from keywords in its label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DetailKind {
    Rain,
    Humidity,
    Wind,
    Clock,
    Thermometer,
    Plain,
}

impl DetailKind {
    pub fn from_label(label: &str) -> Self {
        let text = label.to_lowercase();
        let has = |words: &[&str]| words.iter().any(|w| text.contains(w));

        if has(&["chuva", "rain", "precip"]) {
            Self::Rain
        } else if has(&["umid", "humidity"]) {
            Self::Humidity
        } else if has(&["vento", "wind"]) {
            Self::Wind
        } else if has(&["hora", "time"]) {
            Self::Clock
        } else if has(&["máx", "max", "mín", "min", "temp"]) {
            Self::Thermometer
        } else {
            Self::Plain
        }
    }
}

const WEEKDAYS: [&str; 7] = ["dom", "seg", "ter", "qua", "qui", "sex", "sáb"];
const MONTHS: [&str; 12] = [
    "jan", "fev", "mar", "abr", "mai", "jun", "jul", "ago", "set", "out", "nov", "dez",
];

/// Short pt-BR card title for an ISO date: `2024-01-15` → `seg, 15 jan`.
/// Anything that is not a plain ISO date is returned untouched.
pub fn format_day(date: &str) -> String {
    match NaiveDate::parse_from_str(date, "%Y-%m-%d") {
        Ok(d) => format!(
            "{}, {:02} {}",
            WEEKDAYS[d.weekday().num_days_from_sunday() as usize],
            d.day(),
            MONTHS[d.month0() as usize],
        ),
        Err(_) => date.to_string(),
    }
}

/// `HH:MM` of an observation timestamp, or the raw text if it does not parse.
pub fn format_clock(timestamp: &str) -> String {
    for fmt in ["%Y-%m-%dT%H:%M", "%Y-%m-%dT%H:%M:%S"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(timestamp, fmt) {
            return dt.format("%H:%M").to_string();
        }
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(timestamp) {
        return dt.format("%H:%M").to_string();
    }

    timestamp.to_string()
}
