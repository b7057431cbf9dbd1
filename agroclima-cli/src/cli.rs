use agroclima_core::{Config, Dashboard, DashboardState, source_from_config};
use anyhow::{Context, bail};
use clap::{Parser, Subcommand};
use inquire::{CustomType, Text};
use tracing::{debug, info};

use crate::render;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "agroclima", version, about = "Agricultural weather dashboard")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Set the backend URL, request timeout and number of forecast cards.
    Configure,

    /// Show current conditions and the daily forecast for a city.
    Show {
        /// City name, e.g. "Ribeirão Preto, Brasil".
        city: String,

        /// How many forecast days to list; defaults to the configured value.
        #[arg(long)]
        days: Option<usize>,

        /// Print the normalized data as JSON instead of cards.
        #[arg(long)]
        json: bool,
    },
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command {
            Command::Configure => configure(),
            Command::Show { city, days, json } => show(&city, days, json).await,
        }
    }
}

fn configure() -> anyhow::Result<()> {
    let mut cfg = Config::load()?;

    let url = Text::new("Backend URL:")
        .with_default(&cfg.backend_url)
        .prompt()
        .context("Backend URL prompt was cancelled")?;
    cfg.set_backend_url(&url)?;

    cfg.timeout_secs = CustomType::<u64>::new("Request timeout (seconds):")
        .with_default(cfg.timeout_secs)
        .prompt()
        .context("Timeout prompt was cancelled")?;

    cfg.forecast_days = CustomType::<usize>::new("Forecast days to show:")
        .with_default(cfg.forecast_days)
        .prompt()
        .context("Forecast days prompt was cancelled")?;

    cfg.validate()?;
    cfg.save()?;

    let path = Config::config_file_path()?;
    info!(path = %path.display(), "Configuration saved");
    println!("Configuração salva em {}", path.display());

    Ok(())
}

async fn show(city: &str, days: Option<usize>, json: bool) -> anyhow::Result<()> {
    let cfg = Config::load()?;
    let days = days.unwrap_or(cfg.forecast_days);
    debug!(backend = %cfg.backend_url, days, "Loaded configuration");

    let dashboard = Dashboard::new(source_from_config(&cfg)?);
    let state = dashboard.search(DashboardState::with_query(city)).await;

    if let Some(message) = state.error {
        bail!(message);
    }
    let Some(bundle) = state.result else {
        bail!("Informe uma cidade para buscar");
    };

    let view = render::DashboardView::new(&bundle, days);
    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&view).context("Failed to serialize forecast")?
        );
    } else {
        print!("{view}");
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_show_with_options() {
        let cli = Cli::try_parse_from(["agroclima", "show", "Ribeirão Preto", "--days", "3", "--json"])
            .expect("valid arguments");

        match cli.command {
            Command::Show { city, days, json } => {
                assert_eq!(city, "Ribeirão Preto");
                assert_eq!(days, Some(3));
                assert!(json);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn show_requires_a_city() {
        assert!(Cli::try_parse_from(["agroclima", "show"]).is_err());
    }

    #[test]
    fn configure_takes_no_arguments() {
        let cli = Cli::try_parse_from(["agroclima", "configure"]).expect("valid arguments");
        assert!(matches!(cli.command, Command::Configure));
    }
}
