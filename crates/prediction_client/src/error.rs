use pima_form::PredictionError;
use thiserror::Error;

/// Why a request failed. Only logged; callers of the form see a [`PredictionError`].
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("server answered {status}: {body}")]
    Status { status: u16, body: String },
    #[error("malformed response body: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("probability {0} is outside [0, 1]")]
    ProbabilityOutOfRange(f64),
}

impl From<ClientError> for PredictionError {
    fn from(value: ClientError) -> Self {
        PredictionError::new(value.to_string())
    }
}
