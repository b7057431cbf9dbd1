//! Wire shapes of the backend's `/api/weather-forecast` endpoint.
//!
//! Everything is optional here; deciding what is actually required happens in
//! [`crate::normalize`], so a missing field becomes a named error instead of a
//! generic deserialization failure.

use serde::{Deserialize, Deserializer};
use serde_json::{Map, Value};

use crate::{
    advisory::coerce_number,
    error::{FetchError, GENERIC_FETCH_ERROR},
};

#[derive(Debug, Clone, Deserialize)]
pub struct ForecastPayload {
    #[serde(default)]
    pub city: Option<String>,
    /// Loose object: field names differ between upstream API versions.
    #[serde(default)]
    pub current_weather: Option<Map<String, Value>>,
    #[serde(default)]
    pub daily_forecast: Option<RawDailyForecast>,
}

impl ForecastPayload {
    pub fn from_json(body: &str) -> Result<Self, FetchError> {
        serde_json::from_str(body).map_err(|e| FetchError::malformed(e.to_string()))
    }
}

/// Parallel arrays, all indexed by day offset.
///
/// Numeric elements go through [`loose_number`]; one that cannot be read
/// becomes `None` rather than failing the whole body.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawDailyForecast {
    #[serde(default)]
    pub time: Option<Vec<String>>,
    #[serde(default, deserialize_with = "loose_numbers")]
    pub temperature_2m_max: Option<Vec<Option<f64>>>,
    #[serde(default, deserialize_with = "loose_numbers")]
    pub temperature_2m_min: Option<Vec<Option<f64>>>,
    #[serde(default, deserialize_with = "loose_numbers")]
    pub precipitation_sum: Option<Vec<Option<f64>>>,
    #[serde(default, deserialize_with = "loose_numbers")]
    pub weathercode: Option<Vec<Option<f64>>>,
    #[serde(default, deserialize_with = "loose_numbers")]
    pub wind_speed_10m: Option<Vec<Option<f64>>>,
}

/// A number sent either as JSON number or as text like `"31°C"`.
/// Anything else, and non-finite values, read as absent.
pub fn loose_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64().filter(|n| n.is_finite()),
        Value::String(s) => coerce_number(s),
        _ => None,
    }
}

fn loose_numbers<'de, D>(deserializer: D) -> Result<Option<Vec<Option<f64>>>, D::Error>
where
    D: Deserializer<'de>,
{
    let values = Option::<Vec<Value>>::deserialize(deserializer)?;
    Ok(values.map(|v| v.iter().map(loose_number).collect()))
}

/// Body of a non-2xx response.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApiErrorBody {
    #[serde(default)]
    pub detail: Option<Value>,
}

impl ApiErrorBody {
    /// The `detail` text, or the generic message when the body has none
    /// (or is not JSON at all).
    pub fn message_from(body: &str) -> String {
        serde_json::from_str::<ApiErrorBody>(body)
            .ok()
            .and_then(|b| match b.detail {
                Some(Value::String(s)) if !s.is_empty() => Some(s),
                _ => None,
            })
            .unwrap_or_else(|| GENERIC_FETCH_ERROR.to_string())
    }
}
