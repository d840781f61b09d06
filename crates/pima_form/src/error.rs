use thiserror::Error;

/// A prediction request that did not produce a usable result.
///
/// Transport failures, error statuses and malformed bodies all collapse into
/// this one error; `detail` is kept for logs only.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("connection to the prediction server failed")]
pub struct PredictionError {
    detail: String,
}

impl PredictionError {
    pub fn new(detail: impl Into<String>) -> Self {
        Self {
            detail: detail.into(),
        }
    }

    pub fn detail(&self) -> &str {
        &self.detail
    }
}
