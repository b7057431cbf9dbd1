use crate::{
    Config, ForecastBundle,
    error::FetchError,
    model::CityQuery,
    provider::backend::BackendClient,
};
use async_trait::async_trait;
use std::fmt::Debug;

pub mod backend;

/// Anything that can turn a city into a normalized forecast.
#[async_trait]
pub trait ForecastSource: Send + Sync + Debug {
    async fn fetch_forecast(&self, city: &CityQuery) -> Result<ForecastBundle, FetchError>;
}

/// Construct the backend source described by `config`.
pub fn source_from_config(config: &Config) -> anyhow::Result<Box<dyn ForecastSource>> {
    config.validate()?;

    let client = BackendClient::new(config).map_err(|e| {
        anyhow::anyhow!(
            "Could not set up the HTTP client for '{}': {e}",
            config.backend_url
        )
    })?;

    Ok(Box::new(client))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn source_from_default_config_builds() {
        let cfg = Config::default();
        assert!(source_from_config(&cfg).is_ok());
    }

    #[test]
    fn source_from_config_rejects_invalid_url() {
        let cfg = Config {
            backend_url: "definitely not a url".to_string(),
            ..Config::default()
        };
        let err = source_from_config(&cfg).unwrap_err();
        assert!(err.to_string().contains("Invalid backend URL"));
    }

    #[test]
    fn forecast_url_appends_api_path() {
        let mut cfg = Config::default();
        cfg.set_backend_url("http://example.com:9000/").expect("valid url");

        let client = BackendClient::new(&cfg).expect("client");
        assert_eq!(
            client.forecast_url(),
            "http://example.com:9000/api/weather-forecast"
        );
    }
}
