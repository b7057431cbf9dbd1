use std::fmt;

use agroclima_core::{
    AdvisoryResult, DailyForecastRecord, DetailKind, DetailPair, ForecastBundle, QuickSummary,
    Tone, WeatherCategory, display::format_day,
};
use serde::Serialize;

const FARMING_NOTE: &str = "Com base nos dados atuais, verifique a necessidade de irrigação nos \
próximos 2 dias: se chuvas forem inferiores a 3 mm e temperatura média estiver acima de 28°C, \
planeje irrigação preventiva.";

/// Day cards only have room for the first few detail lines.
const COMPACT_DETAILS: usize = 3;

/// Everything the terminal shows for one search, also emitted as `--json`.
#[derive(Debug, Serialize)]
pub struct DashboardView<'a> {
    pub title: String,
    pub resolved_name: Option<&'a str>,
    pub condition: Option<WeatherCategory>,
    pub temperature: String,
    pub details: Vec<DetailPair>,
    pub advisory: AdvisoryResult,
    pub summary: QuickSummary,
    pub days: Vec<DayCard<'a>>,
}

#[derive(Debug, Serialize)]
pub struct DayCard<'a> {
    pub title: String,
    pub condition: WeatherCategory,
    #[serde(flatten)]
    pub record: &'a DailyForecastRecord,
    pub advisory: AdvisoryResult,
}

impl<'a> DashboardView<'a> {
    pub fn new(bundle: &'a ForecastBundle, days: usize) -> Self {
        let current = &bundle.current;

        Self {
            title: format!("Clima Atual — {}", bundle.city),
            resolved_name: bundle
                .resolved_name
                .as_deref()
                .filter(|name| *name != bundle.city),
            condition: current.weather_code.map(WeatherCategory::from_code),
            temperature: current.temperature_label(),
            details: current.details(),
            advisory: current.advisory(),
            summary: bundle.summary(),
            days: bundle.next_days(days).iter().map(DayCard::new).collect(),
        }
    }
}

impl<'a> DayCard<'a> {
    fn new(record: &'a DailyForecastRecord) -> Self {
        Self {
            title: format_day(&record.date),
            condition: WeatherCategory::from_code(record.weather_code),
            record,
            advisory: record.advisory(),
        }
    }
}

impl fmt::Display for DashboardView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.title)?;
        if let Some(name) = self.resolved_name {
            writeln!(f, "  ({name})")?;
        }

        let condition = self
            .condition
            .map(|c| format!("{} {}", category_glyph(c), c.description()))
            .unwrap_or_else(|| "Condição indisponível".to_string());
        writeln!(f, "  {condition}   {}", self.temperature)?;
        writeln!(f, "  Previsão voltada para produtividade agrícola")?;

        for detail in &self.details {
            writeln!(f, "  {}", detail_line(detail))?;
        }
        writeln!(f, "  {}", advisory_line(&self.advisory))?;

        writeln!(f)?;
        writeln!(f, "Resumo rápido")?;
        writeln!(
            f,
            "  Umidade: {}  |  Vento: {}  |  Precipitação: {}  |  Temperatura: {}",
            self.summary.humidity,
            self.summary.wind,
            self.summary.precipitation,
            self.summary.temperature,
        )?;

        writeln!(f)?;
        writeln!(f, "Conselho agrícola")?;
        writeln!(f, "  {FARMING_NOTE}")?;

        writeln!(f)?;
        writeln!(f, "Previsão | Próximos dias")?;
        if self.days.is_empty() {
            writeln!(f, "  Sem previsão disponível")?;
        }
        for day in &self.days {
            write!(f, "{day}")?;
        }

        Ok(())
    }
}

impl fmt::Display for DayCard<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "  {:<12} {} {}°C (média)",
            self.title,
            category_glyph(self.condition),
            self.record.temp_avg,
        )?;

        let details: Vec<String> = self
            .record
            .details
            .iter()
            .take(COMPACT_DETAILS)
            .map(detail_line)
            .collect();
        writeln!(f, "    {}", details.join("   "))?;
        writeln!(f, "    {}", advisory_line(&self.advisory))
    }
}

fn category_glyph(category: WeatherCategory) -> &'static str {
    match category {
        WeatherCategory::Clear => "☀",
        WeatherCategory::PartlyCloudy => "⛅",
        WeatherCategory::Cloudy => "☁",
        WeatherCategory::Rain => "☂",
        WeatherCategory::Snow => "❄",
        WeatherCategory::Wind => "≋",
    }
}

fn detail_line(detail: &DetailPair) -> String {
    let glyph = match DetailKind::from_label(&detail.label) {
        DetailKind::Rain => "☂",
        DetailKind::Humidity => "≈",
        DetailKind::Wind => "➶",
        DetailKind::Clock => "◷",
        DetailKind::Thermometer => "°",
        DetailKind::Plain => "·",
    };
    format!("{glyph} {}: {}", detail.label, detail.value)
}

fn advisory_line(advisory: &AdvisoryResult) -> String {
    let mark = match advisory.tone {
        Tone::Green => "✔",
        Tone::Amber => "⚠",
    };
    format!("{mark} {}: {}", advisory.label, advisory.value)
}
