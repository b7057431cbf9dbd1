use reqwest::StatusCode;
use thiserror::Error;

/// Fallback shown when the backend rejects a search without a usable `detail`.
pub const GENERIC_FETCH_ERROR: &str = "Erro ao buscar clima";

/// Everything that can go wrong between a submitted city and a rendered forecast.
///
/// `Display` is the single user-visible message: callers show `err.to_string()`
/// in place of results, whichever variant it is.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Informe uma cidade para buscar")]
    EmptyCity,

    /// The request could not be sent or no response arrived.
    #[error("Falha de conexão com o servidor de clima: {0}")]
    Network(String),

    /// Non-2xx response. Displays the backend's `detail` verbatim.
    #[error("{detail}")]
    ApiError { status: StatusCode, detail: String },

    /// 2xx response whose body is not the expected forecast shape.
    #[error("Resposta de clima inválida: {0}")]
    MalformedResponse(String),
}

impl FetchError {
    pub fn malformed(reason: impl Into<String>) -> Self {
        FetchError::MalformedResponse(reason.into())
    }

    pub fn is_malformed(&self) -> bool {
        matches!(self, FetchError::MalformedResponse(_))
    }
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        FetchError::Network(err.to_string())
    }
}
