use serde::{Deserialize, Serialize};

use crate::{
    advisory::{AdvisoryInput, advise},
    display::format_clock,
    error::FetchError,
};

/// Placeholder for a value the backend did not send at all.
pub const NOT_AVAILABLE: &str = "N/A";
/// Placeholder for a value that exists as a slot but is empty.
pub const EMPTY_VALUE: &str = "-";

/// A city name as typed by the user, trimmed and known to be non-empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct CityQuery(String);

impl CityQuery {
    pub fn new(raw: &str) -> Result<Self, FetchError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(FetchError::EmptyCity);
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for CityQuery {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// A `{label, value}` line on a card. The advisory heuristic reads these too.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetailPair {
    pub label: String,
    pub value: String,
}

impl DetailPair {
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    /// Favorable conditions.
    Green,
    /// Needs attention.
    Amber,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdvisoryResult {
    pub label: String,
    pub value: String,
    pub tone: Tone,
}

impl AdvisoryResult {
    pub(crate) fn new(label: &str, value: &str, tone: Tone) -> Self {
        Self {
            label: label.to_string(),
            value: value.to_string(),
            tone,
        }
    }
}

/// Wind direction as reported upstream: usually degrees, sometimes a compass text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum WindDirection {
    Degrees(f64),
    Text(String),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CurrentWeather {
    pub temperature: Option<f64>,
    pub weather_code: Option<i32>,
    pub wind_speed: Option<f64>,
    pub wind_direction: Option<WindDirection>,
    pub humidity: Option<f64>,
    pub observed_at: Option<String>,
}

impl CurrentWeather {
    /// Summary card details, always in the order Vento, Direção, Hora (UTC), Umidade.
    pub fn details(&self) -> Vec<DetailPair> {
        let wind = self
            .wind_speed
            .map(|w| format!("{} km/h", number(w)))
            .unwrap_or_else(|| NOT_AVAILABLE.to_string());

        let direction = match &self.wind_direction {
            Some(WindDirection::Degrees(deg)) => format!("{}°", number(*deg)),
            Some(WindDirection::Text(text)) => text.clone(),
            None => NOT_AVAILABLE.to_string(),
        };

        let time = self
            .observed_at
            .as_deref()
            .map(format_clock)
            .unwrap_or_else(|| NOT_AVAILABLE.to_string());

        let humidity = self
            .humidity
            .map(|h| format!("{}%", number(h)))
            .unwrap_or_else(|| EMPTY_VALUE.to_string());

        vec![
            DetailPair::new("Vento", wind),
            DetailPair::new("Direção", direction),
            DetailPair::new("Hora (UTC)", time),
            DetailPair::new("Umidade", humidity),
        ]
    }

    pub fn advisory(&self) -> AdvisoryResult {
        advise(&AdvisoryInput::from_details(
            self.temperature,
            &self.details(),
        ))
    }

    pub fn temperature_label(&self) -> String {
        self.temperature
            .map(|t| format!("{}°C", number(t)))
            .unwrap_or_else(|| NOT_AVAILABLE.to_string())
    }
}

/// One day of the forecast carousel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyForecastRecord {
    /// ISO date exactly as sent by the backend.
    pub date: String,
    pub temp_max: f64,
    pub temp_min: f64,
    /// Always `average_temperature(temp_max, temp_min)`.
    pub temp_avg: i64,
    pub precipitation_sum: f64,
    pub wind_speed: Option<f64>,
    pub weather_code: i32,
    /// Máx, Mín, Chuva, Vento.
    pub details: Vec<DetailPair>,
}

impl DailyForecastRecord {
    /// Day cards are judged on the average temperature.
    pub fn advisory(&self) -> AdvisoryResult {
        advise(&AdvisoryInput::from_details(
            Some(self.temp_avg as f64),
            &self.details,
        ))
    }
}

/// Result of one search: what the summary card and the carousel display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastBundle {
    /// The city as the user typed it.
    pub city: String,
    /// Place name the backend geocoded the query to, when it reports one.
    #[serde(default)]
    pub resolved_name: Option<String>,
    pub current: CurrentWeather,
    /// Chronological, as received. Never re-sorted.
    pub daily: Vec<DailyForecastRecord>,
}

impl ForecastBundle {
    /// The first `days` records, in order.
    pub fn next_days(&self, days: usize) -> &[DailyForecastRecord] {
        &self.daily[..days.min(self.daily.len())]
    }

    pub fn summary(&self) -> QuickSummary {
        QuickSummary::from_bundle(self)
    }
}

/// The "Resumo rápido" panel beside the summary card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuickSummary {
    pub humidity: String,
    pub wind: String,
    pub precipitation: String,
    pub temperature: String,
}

impl QuickSummary {
    pub fn from_bundle(bundle: &ForecastBundle) -> Self {
        let current = &bundle.current;
        let rain_today = bundle
            .daily
            .first()
            .map(|d| d.precipitation_sum)
            .unwrap_or(0.0);

        Self {
            humidity: current
                .humidity
                .map(|h| format!("{}%", number(h)))
                .unwrap_or_else(|| EMPTY_VALUE.to_string()),
            wind: current
                .wind_speed
                .map(|w| format!("{} km/h", number(w)))
                .unwrap_or_else(|| EMPTY_VALUE.to_string()),
            precipitation: format!("{} mm/dia", number(rain_today)),
            temperature: current.temperature_label(),
        }
    }
}

/// Shortest decimal rendering: `30.0` prints as `30`, `12.5` as `12.5`.
pub(crate) fn number(value: f64) -> String {
    value.to_string()
}
