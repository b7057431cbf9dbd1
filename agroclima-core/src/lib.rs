//! Core library for the `agroclima` dashboard.
//!
//! This crate defines:
//! - The display model (current conditions, daily forecast cards, advisories)
//! - Normalization of the backend's forecast payload into that model
//! - The irrigation advisory heuristic
//! - Dashboard state transitions and the backend client
//! - Configuration handling
//!
//! It is used by `agroclima-cli`, but any other front end can drive it the same way.

pub mod advisory;
pub mod config;
pub mod display;
pub mod error;
pub mod model;
pub mod normalize;
pub mod payload;
pub mod provider;
pub mod state;

pub use advisory::{AdvisoryInput, advise, advise_details};
pub use config::Config;
pub use display::{DetailKind, WeatherCategory};
pub use error::FetchError;
pub use model::{
    AdvisoryResult, CityQuery, CurrentWeather, DailyForecastRecord, DetailPair, ForecastBundle,
    QuickSummary, Tone, WindDirection,
};
pub use provider::{ForecastSource, source_from_config};
pub use state::{Action, Dashboard, DashboardState};
