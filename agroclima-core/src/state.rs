//! Dashboard state as an immutable value driven by actions.
//!
//! Every transition goes through [`DashboardState::reduce`]. A search bumps
//! `generation`; completions carry the generation they were started with, so a
//! slow answer to an older search can never overwrite a newer one.

use tracing::debug;

use crate::{
    model::{CityQuery, ForecastBundle},
    provider::ForecastSource,
};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DashboardState {
    /// Text currently in the search box.
    pub query: String,
    /// City of the result on display.
    pub searched_city: Option<String>,
    pub loading: bool,
    /// User-facing message of the last failed search.
    pub error: Option<String>,
    pub result: Option<ForecastBundle>,
    pub generation: u64,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    QueryChanged(String),
    SearchStarted,
    SearchSucceeded {
        generation: u64,
        bundle: ForecastBundle,
    },
    SearchFailed {
        generation: u64,
        message: String,
    },
}

impl DashboardState {
    pub fn with_query(query: impl Into<String>) -> Self {
        Self::default().reduce(Action::QueryChanged(query.into()))
    }

    pub fn reduce(self, action: Action) -> Self {
        match action {
            Action::QueryChanged(query) => Self { query, ..self },

            Action::SearchStarted => Self {
                loading: true,
                error: None,
                result: None,
                generation: self.generation + 1,
                ..self
            },

            Action::SearchSucceeded { generation, bundle } if generation == self.generation => {
                Self {
                    loading: false,
                    error: None,
                    searched_city: Some(bundle.city.clone()),
                    result: Some(bundle),
                    ..self
                }
            }

            Action::SearchFailed {
                generation,
                message,
            } if generation == self.generation => Self {
                loading: false,
                error: Some(message),
                result: None,
                ..self
            },

            Action::SearchSucceeded { generation, .. } | Action::SearchFailed { generation, .. } => {
                debug!(
                    stale = generation,
                    current = self.generation,
                    "Dropping completion of a superseded search"
                );
                self
            }
        }
    }

    /// No search in flight; a new one may be submitted.
    pub fn is_idle(&self) -> bool {
        !self.loading
    }
}

/// Runs search cycles against a forecast source.
#[derive(Debug)]
pub struct Dashboard {
    source: Box<dyn ForecastSource>,
}

impl Dashboard {
    pub fn new(source: Box<dyn ForecastSource>) -> Self {
        Self { source }
    }

    /// Submit the current query and return the settled state.
    ///
    /// A blank query is ignored: no request, state returned untouched.
    pub async fn search(&self, state: DashboardState) -> DashboardState {
        let Ok(city) = CityQuery::new(&state.query) else {
            return state;
        };

        let state = state.reduce(Action::SearchStarted);
        let generation = state.generation;

        let action = match self.source.fetch_forecast(&city).await {
            Ok(bundle) => Action::SearchSucceeded { generation, bundle },
            Err(err) => Action::SearchFailed {
                generation,
                message: err.to_string(),
            },
        };

        state.reduce(action)
    }
}
