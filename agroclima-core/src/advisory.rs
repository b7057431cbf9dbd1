//! Irrigation advisory heuristic.
//!
//! A card is judged from its temperature plus whatever rain and humidity can be
//! read off its detail lines. Rules are checked top to bottom and the first match
//! wins:
//!
//! 1. rain ≥ 5 mm → "Situação: Boa (chuva suficiente)" (green)
//! 2. temperature ≥ 30 °C and rain absent or < 1 mm → "Irrigação: Recomendada" (amber)
//! 3. humidity < 40 % → "Alerta: Baixa umidade" (amber)
//! 4. otherwise → "Situação: Normal" (green)

use crate::model::{AdvisoryResult, DetailPair, Tone};

const RAIN_SUFFICIENT_MM: f64 = 5.0;
const RAIN_NEGLIGIBLE_MM: f64 = 1.0;
const HOT_CELSIUS: f64 = 30.0;
const DRY_HUMIDITY_PCT: f64 = 40.0;

const RAIN_KEYWORDS: &[&str] = &["chuva", "rain", "precipitation"];
const HUMIDITY_KEYWORDS: &[&str] = &["umid", "humidity"];

/// Inputs to the heuristic. `None` means "not reported", which is not the same as zero.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct AdvisoryInput {
    pub temperature: Option<f64>,
    pub rain: Option<f64>,
    pub humidity: Option<f64>,
}

impl AdvisoryInput {
    pub fn from_details(temperature: Option<f64>, details: &[DetailPair]) -> Self {
        Self {
            temperature,
            rain: find_detail(details, RAIN_KEYWORDS),
            humidity: find_detail(details, HUMIDITY_KEYWORDS),
        }
    }
}

pub fn advise(input: &AdvisoryInput) -> AdvisoryResult {
    if input.rain.is_some_and(|r| r >= RAIN_SUFFICIENT_MM) {
        return AdvisoryResult::new("Situação", "Boa (chuva suficiente)", Tone::Green);
    }

    let dry = input.rain.is_none_or(|r| r < RAIN_NEGLIGIBLE_MM);
    if input.temperature.is_some_and(|t| t >= HOT_CELSIUS) && dry {
        return AdvisoryResult::new("Irrigação", "Recomendada", Tone::Amber);
    }

    if input.humidity.is_some_and(|h| h < DRY_HUMIDITY_PCT) {
        return AdvisoryResult::new("Alerta", "Baixa umidade", Tone::Amber);
    }

    AdvisoryResult::new("Situação", "Normal", Tone::Green)
}

/// Entry point for callers holding the temperature as display text, e.g. `"31°C"`.
pub fn advise_details(temperature: &str, details: &[DetailPair]) -> AdvisoryResult {
    advise(&AdvisoryInput::from_details(
        coerce_number(temperature),
        details,
    ))
}

/// Reads a number out of display text by dropping everything except digits,
/// `.` and `-`. `"12.5 mm"` gives `12.5`; `"- km/h"` and `"N/A"` give `None`.
pub fn coerce_number(text: &str) -> Option<f64> {
    let kept: String = text
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.' || *c == '-')
        .collect();

    if kept.is_empty() {
        return None;
    }
    kept.parse::<f64>().ok().filter(|n| n.is_finite())
}

fn find_detail(details: &[DetailPair], keywords: &[&str]) -> Option<f64> {
    details
        .iter()
        .find(|d| {
            let label = d.label.to_lowercase();
            keywords.iter().any(|k| label.contains(k))
        })
        .and_then(|d| coerce_number(&d.value))
}
