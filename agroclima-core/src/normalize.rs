//! Raw backend payload → display model.

use serde_json::{Map, Value};

use crate::{
    error::FetchError,
    model::{
        CityQuery, CurrentWeather, DailyForecastRecord, DetailPair, EMPTY_VALUE, ForecastBundle,
        WindDirection, number,
    },
    payload::{ForecastPayload, RawDailyForecast, loose_number},
};

// Alternative key names, highest priority first.
const TEMPERATURE_KEYS: &[&str] = &["temperature_2m", "temperature", "temp"];
const WEATHER_CODE_KEYS: &[&str] = &["weathercode", "weather_code", "weatherCode"];
const WIND_SPEED_KEYS: &[&str] = &["wind_speed_10m", "windspeed", "windSpeed"];
const WIND_DIRECTION_KEYS: &[&str] = &["wind_direction_10m", "winddirection", "windDirection"];
const HUMIDITY_KEYS: &[&str] = &["relative_humidity_2m", "relativeHumidity"];
const OBSERVED_AT_KEYS: &[&str] = &["time"];

/// Mean of max and min, rounded half away from zero (25.5 → 26, -2.5 → -3).
pub fn average_temperature(max: f64, min: f64) -> i64 {
    ((max + min) / 2.0).round() as i64
}

pub fn normalize_payload(
    city: &CityQuery,
    payload: ForecastPayload,
) -> Result<ForecastBundle, FetchError> {
    let current = payload
        .current_weather
        .as_ref()
        .map(normalize_current)
        .ok_or_else(|| FetchError::malformed("missing current_weather"))?;

    let daily = payload
        .daily_forecast
        .as_ref()
        .ok_or_else(|| FetchError::malformed("missing daily_forecast"))
        .and_then(normalize_daily)?;

    Ok(ForecastBundle {
        city: city.to_string(),
        resolved_name: payload.city.filter(|name| !name.trim().is_empty()),
        current,
        daily,
    })
}

pub fn normalize_current(raw: &Map<String, Value>) -> CurrentWeather {
    CurrentWeather {
        temperature: first_present(raw, TEMPERATURE_KEYS).and_then(loose_number),
        weather_code: first_present(raw, WEATHER_CODE_KEYS)
            .and_then(loose_number)
            .map(|c| c.round() as i32),
        wind_speed: first_present(raw, WIND_SPEED_KEYS).and_then(loose_number),
        wind_direction: first_present(raw, WIND_DIRECTION_KEYS).and_then(as_direction),
        humidity: first_present(raw, HUMIDITY_KEYS).and_then(loose_number),
        observed_at: first_present(raw, OBSERVED_AT_KEYS).and_then(as_text),
    }
}

/// One record per entry of `time`, in the order received.
pub fn normalize_daily(raw: &RawDailyForecast) -> Result<Vec<DailyForecastRecord>, FetchError> {
    let time = required(&raw.time, "time")?;
    let max = required(&raw.temperature_2m_max, "temperature_2m_max")?;
    let min = required(&raw.temperature_2m_min, "temperature_2m_min")?;
    let codes = required(&raw.weathercode, "weathercode")?;

    time.iter()
        .enumerate()
        .map(|(i, date)| -> Result<DailyForecastRecord, FetchError> {
            let temp_max = at(max, i, "temperature_2m_max")?;
            let temp_min = at(min, i, "temperature_2m_min")?;
            let weather_code = at(codes, i, "weathercode")?.round() as i32;
            let precipitation_sum = optional_at(&raw.precipitation_sum, i).unwrap_or(0.0);
            let wind_speed = optional_at(&raw.wind_speed_10m, i);

            Ok(DailyForecastRecord {
                date: date.clone(),
                temp_max,
                temp_min,
                temp_avg: average_temperature(temp_max, temp_min),
                precipitation_sum,
                wind_speed,
                weather_code,
                details: day_details(temp_max, temp_min, precipitation_sum, wind_speed),
            })
        })
        .collect()
}

fn day_details(max: f64, min: f64, rain: f64, wind: Option<f64>) -> Vec<DetailPair> {
    let wind = wind.map(number).unwrap_or_else(|| EMPTY_VALUE.to_string());

    vec![
        DetailPair::new("Máx", format!("{}°C", number(max))),
        DetailPair::new("Mín", format!("{}°C", number(min))),
        DetailPair::new("Chuva", format!("{} mm", number(rain))),
        DetailPair::new("Vento", format!("{wind} km/h")),
    ]
}

fn first_present<'a>(raw: &'a Map<String, Value>, keys: &[&str]) -> Option<&'a Value> {
    keys.iter()
        .find_map(|key| raw.get(*key).filter(|v| !v.is_null()))
}

fn as_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn as_direction(value: &Value) -> Option<WindDirection> {
    match value {
        Value::Number(_) => loose_number(value).map(WindDirection::Degrees),
        Value::String(s) if s.trim().is_empty() => None,
        Value::String(s) => Some(match s.trim().parse::<f64>() {
            Ok(deg) if deg.is_finite() => WindDirection::Degrees(deg),
            _ => WindDirection::Text(s.clone()),
        }),
        _ => None,
    }
}

fn required<'a, T>(values: &'a Option<Vec<T>>, field: &str) -> Result<&'a [T], FetchError> {
    values
        .as_deref()
        .ok_or_else(|| FetchError::malformed(format!("daily_forecast.{field} is missing")))
}

fn at<T: Copy>(values: &[Option<T>], i: usize, field: &str) -> Result<T, FetchError> {
    values
        .get(i)
        .copied()
        .flatten()
        .ok_or_else(|| FetchError::malformed(format!("daily_forecast.{field}[{i}] is missing")))
}

fn optional_at(values: &Option<Vec<Option<f64>>>, i: usize) -> Option<f64> {
    values.as_ref().and_then(|v| v.get(i).copied().flatten())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn daily(value: Value) -> RawDailyForecast {
        serde_json::from_value(value).expect("valid daily payload")
    }

    fn object(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            other => panic!("expected object, got {other}"),
        }
    }

    fn without(mut value: Value, key: &str) -> Value {
        if let Some(map) = value.as_object_mut() {
            map.remove(key);
        }
        value
    }

    fn two_days() -> Value {
        json!({
            "time": ["2024-01-01", "2024-01-02"],
            "temperature_2m_max": [30.0, 31.0],
            "temperature_2m_min": [20.0, 20.0],
            "precipitation_sum": [0.4, 6.0],
            "weathercode": [0, 61],
            "wind_speed_10m": [12.0, 8.5]
        })
    }

    #[test]
    fn average_rounds_half_away_from_zero() {
        assert_eq!(average_temperature(30.0, 20.0), 25);
        assert_eq!(average_temperature(31.0, 20.0), 26);
        assert_eq!(average_temperature(-2.0, -3.0), -3);
        assert_eq!(average_temperature(24.2, 20.0), 22);
    }

    #[test]
    fn records_follow_input_order() {
        let records = normalize_daily(&daily(two_days())).expect("normalize");

        let dates: Vec<_> = records.iter().map(|r| r.date.as_str()).collect();
        assert_eq!(dates, ["2024-01-01", "2024-01-02"]);
        assert_eq!(records[0].temp_avg, 25);
        assert_eq!(records[1].temp_avg, 26);
        assert_eq!(records[1].weather_code, 61);
    }

    #[test]
    fn records_are_never_resorted() {
        let mut raw = two_days();
        raw["time"] = json!(["2024-01-05", "2024-01-02"]);
        let records = normalize_daily(&daily(raw)).expect("normalize");
        assert_eq!(records[0].date, "2024-01-05");
    }

    #[test]
    fn details_have_fixed_order_and_units() {
        let records = normalize_daily(&daily(two_days())).expect("normalize");
        let details = &records[0].details;

        let labels: Vec<_> = details.iter().map(|d| d.label.as_str()).collect();
        assert_eq!(labels, ["Máx", "Mín", "Chuva", "Vento"]);

        let values: Vec<_> = details.iter().map(|d| d.value.as_str()).collect();
        assert_eq!(values, ["30°C", "20°C", "0.4 mm", "12 km/h"]);
    }

    #[test]
    fn missing_wind_array_gives_placeholder() {
        let raw = without(two_days(), "wind_speed_10m");

        let records = normalize_daily(&daily(raw)).expect("normalize");
        for record in &records {
            assert_eq!(record.wind_speed, None);
            assert_eq!(record.details[3].value, "- km/h");
        }
    }

    #[test]
    fn null_precipitation_counts_as_zero() {
        let mut raw = two_days();
        raw["precipitation_sum"] = json!([null, 2.0]);

        let records = normalize_daily(&daily(raw)).expect("normalize");
        assert_eq!(records[0].precipitation_sum, 0.0);
        assert_eq!(records[0].details[2].value, "0 mm");
        assert_eq!(records[1].precipitation_sum, 2.0);
    }

    #[test]
    fn missing_required_array_is_malformed() {
        let raw = without(two_days(), "temperature_2m_max");

        let err = normalize_daily(&daily(raw)).unwrap_err();
        assert!(err.is_malformed());
        assert!(err.to_string().contains("temperature_2m_max"));
    }

    #[test]
    fn short_array_is_malformed() {
        let mut raw = two_days();
        raw["weathercode"] = json!([0]);

        let err = normalize_daily(&daily(raw)).unwrap_err();
        assert!(err.to_string().contains("weathercode[1]"));
    }

    #[test]
    fn day_advisory_uses_average_temperature() {
        let records = normalize_daily(&daily(two_days())).expect("normalize");
        // avg 25, rain 0.4 → nothing fires
        assert_eq!(records[0].advisory().value, "Normal");
        // rain 6 mm
        assert_eq!(records[1].advisory().value, "Boa (chuva suficiente)");
    }

    #[test]
    fn hot_dry_day_recommends_irrigation() {
        let raw = json!({
            "time": ["2024-02-01"],
            "temperature_2m_max": [36.0],
            "temperature_2m_min": [26.0],
            "weathercode": [0]
        });
        let records = normalize_daily(&daily(raw)).expect("normalize");
        assert_eq!(records[0].temp_avg, 31);
        assert_eq!(records[0].advisory().value, "Recomendada");
    }

    #[test]
    fn current_reads_keys_in_priority_order() {
        let raw = object(json!({
            "temperature": 18.0,
            "temperature_2m": 27.5,
            "weather_code": 3,
            "windspeed": 9.0,
            "winddirection": 180,
            "relative_humidity_2m": 55,
            "time": "2024-01-15T12:00"
        }));

        let current = normalize_current(&raw);
        assert_eq!(current.temperature, Some(27.5));
        assert_eq!(current.weather_code, Some(3));
        assert_eq!(current.wind_speed, Some(9.0));
        assert_eq!(current.wind_direction, Some(WindDirection::Degrees(180.0)));
        assert_eq!(current.humidity, Some(55.0));
        assert_eq!(current.observed_at.as_deref(), Some("2024-01-15T12:00"));
    }

    #[test]
    fn current_skips_null_and_falls_back() {
        let raw = object(json!({
            "temperature_2m": null,
            "temp": "21.5",
            "windDirection": "NNE",
            "weatherCode": 1
        }));

        let current = normalize_current(&raw);
        assert_eq!(current.temperature, Some(21.5));
        assert_eq!(current.weather_code, Some(1));
        assert_eq!(current.wind_direction, Some(WindDirection::Text("NNE".to_string())));
        assert_eq!(current.wind_speed, None);
        assert_eq!(current.humidity, None);
        assert_eq!(current.observed_at, None);
    }

    #[test]
    fn current_reads_unit_suffixed_text() {
        let raw = object(json!({
            "temperature_2m": "31°C",
            "relative_humidity_2m": "35%"
        }));

        let current = normalize_current(&raw);
        assert_eq!(current.temperature, Some(31.0));
        assert_eq!(current.humidity, Some(35.0));
        assert_eq!(current.advisory().value, "Recomendada");
    }

    #[test]
    fn current_drops_non_finite_text() {
        let raw = object(json!({
            "temperature_2m": "inf",
            "relative_humidity_2m": "NaN"
        }));

        let current = normalize_current(&raw);
        assert_eq!(current.temperature, None);
        assert_eq!(current.humidity, None);
        assert_eq!(current.temperature_label(), "N/A");
        assert_eq!(current.details()[3].value, "-");
        assert_eq!(current.advisory().value, "Normal");
    }

    #[test]
    fn float_codes_and_text_rain_are_accepted() {
        let raw = json!({
            "time": ["2024-03-01"],
            "temperature_2m_max": [30.0],
            "temperature_2m_min": ["20°C"],
            "precipitation_sum": ["6 mm"],
            "weathercode": [61.0]
        });
        let records = normalize_daily(&daily(raw)).expect("normalize");
        assert_eq!(records[0].weather_code, 61);
        assert_eq!(records[0].temp_avg, 25);
        assert_eq!(records[0].precipitation_sum, 6.0);
    }

    #[test]
    fn unreadable_required_element_is_malformed() {
        let mut raw = two_days();
        raw["weathercode"] = json!([0, "cloudy"]);

        let err = normalize_daily(&daily(raw)).unwrap_err();
        assert!(err.to_string().contains("weathercode[1]"));
    }

    #[test]
    fn payload_without_forecast_is_malformed() {
        let city = CityQuery::new("Campinas").expect("city");
        let payload = ForecastPayload::from_json(r#"{"current_weather":{"temperature":20}}"#)
            .expect("parse");

        let err = normalize_payload(&city, payload).unwrap_err();
        assert!(err.to_string().contains("daily_forecast"));
    }

    #[test]
    fn payload_without_current_is_malformed() {
        let city = CityQuery::new("Campinas").expect("city");
        let payload = ForecastPayload::from_json(&json!({ "daily_forecast": two_days() }).to_string())
            .expect("parse");

        let err = normalize_payload(&city, payload).unwrap_err();
        assert!(err.to_string().contains("current_weather"));
    }

    #[test]
    fn full_payload_normalizes() {
        let city = CityQuery::new("Campinas").expect("city");
        let body = json!({
            "city": "Campinas, SP",
            "current_weather": { "temperature_2m": 29.0 },
            "daily_forecast": two_days()
        });
        let payload = ForecastPayload::from_json(&body.to_string()).expect("parse");

        let bundle = normalize_payload(&city, payload).expect("normalize");
        assert_eq!(bundle.city, "Campinas");
        assert_eq!(bundle.resolved_name.as_deref(), Some("Campinas, SP"));
        assert_eq!(bundle.current.temperature, Some(29.0));
        assert_eq!(bundle.daily.len(), 2);
    }
}
