use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, instrument, warn};

use crate::{
    config::Config,
    error::FetchError,
    model::{CityQuery, ForecastBundle},
    normalize::normalize_payload,
    payload::{ApiErrorBody, ForecastPayload},
};

use super::ForecastSource;

const FORECAST_PATH: &str = "/api/weather-forecast";

/// Client for the dashboard's own backend, which geocodes the city and relays
/// current conditions plus a daily forecast.
#[derive(Debug, Clone)]
pub struct BackendClient {
    base_url: String,
    http: Client,
}

impl BackendClient {
    pub fn new(config: &Config) -> Result<Self, FetchError> {
        let http = Client::builder().timeout(config.timeout()).build()?;

        Ok(Self {
            base_url: config.backend_url.trim_end_matches('/').to_string(),
            http,
        })
    }

    pub fn forecast_url(&self) -> String {
        format!("{}{}", self.base_url, FORECAST_PATH)
    }
}

#[async_trait]
impl ForecastSource for BackendClient {
    #[instrument(skip(self, city), fields(city = %city))]
    async fn fetch_forecast(&self, city: &CityQuery) -> Result<ForecastBundle, FetchError> {
        let url = self.forecast_url();
        debug!(url = %url, "Requesting forecast");

        let res = self
            .http
            .get(&url)
            .query(&[("city", city.as_str())])
            .send()
            .await
            .inspect_err(|e| warn!(error = %e, "Forecast request failed"))?;

        let status = res.status();
        let body = res.text().await?;
        debug!(%status, bytes = body.len(), "Forecast response received");

        if !status.is_success() {
            let detail = ApiErrorBody::message_from(&body);
            warn!(%status, %detail, "Backend rejected forecast request");
            return Err(FetchError::ApiError { status, detail });
        }

        let payload = ForecastPayload::from_json(&body)?;
        normalize_payload(city, payload)
            .inspect_err(|e| warn!(error = %e, "Forecast body had an unexpected shape"))
    }
}
