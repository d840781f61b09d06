use std::time::Duration;

use log::{debug, error, info, warn};
use pima_form::{Classification, PatientRecord, PredictionError, PredictionResult, Predictor};
use reqwest::blocking::Client;
use serde::Deserialize;

use crate::config::ClientConfig;
use crate::error::ClientError;

/// Timeout for the start-up reachability probe. Predictions have none.
const PROBE_TIMEOUT: Duration = Duration::from_secs(2);

#[derive(Debug, Deserialize)]
struct PredictResponse {
    prediction: Classification,
    probability: f64,
    // advisory echo of the submitted record; never fails a prediction
    #[serde(default)]
    input_data: Option<serde_json::Value>,
}

/// Body of `GET /` on the prediction service.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ServiceInfo {
    pub message: String,
    #[serde(default)]
    pub docs: Option<String>,
}

pub struct PredictionClient {
    config: ClientConfig,
    http: Client,
}

impl PredictionClient {
    pub fn new(config: ClientConfig) -> Result<Self, ClientError> {
        let http = Client::builder().timeout(None).build()?;
        Ok(Self { config, http })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Sends one `POST /predict`. No retry.
    pub fn request_prediction(&self, record: &PatientRecord) -> Result<PredictionResult, ClientError> {
        let url = self.config.predict_url();
        info!("POST {url}");
        let response = self.http.post(&url).json(record).send()?;
        let status = response.status();
        let body = response.text()?;
        if !status.is_success() {
            return Err(ClientError::Status {
                status: status.as_u16(),
                body,
            });
        }
        let wire: PredictResponse = serde_json::from_str(&body)?;
        let echo = wire
            .input_data
            .clone()
            .and_then(|value| serde_json::from_value::<PatientRecord>(value).ok());
        if echo.is_some_and(|echo| echo != *record) {
            warn!("service echoed a record that differs from the one sent");
        }
        into_result(wire)
    }

    /// Checks that the service answers on its root path.
    pub fn probe(&self) -> Result<ServiceInfo, ClientError> {
        let url = self.config.root_url();
        debug!("GET {url}");
        let response = self.http.get(&url).timeout(PROBE_TIMEOUT).send()?;
        let status = response.status();
        if !status.is_success() {
            return Err(ClientError::Status {
                status: status.as_u16(),
                body: response.text().unwrap_or_default(),
            });
        }
        Ok(response.json()?)
    }
}

impl Predictor for PredictionClient {
    fn predict(&self, record: &PatientRecord) -> Result<PredictionResult, PredictionError> {
        self.request_prediction(record).map_err(|err| {
            error!("prediction request failed: {err}");
            PredictionError::from(err)
        })
    }
}

/// Parses a `/predict` response body.
pub fn decode_prediction(body: &str) -> Result<PredictionResult, ClientError> {
    into_result(serde_json::from_str(body)?)
}

fn into_result(wire: PredictResponse) -> Result<PredictionResult, ClientError> {
    if !(0.0..=1.0).contains(&wire.probability) {
        return Err(ClientError::ProbabilityOutOfRange(wire.probability));
    }
    Ok(PredictionResult {
        prediction: wire.prediction,
        probability: wire.probability,
    })
}
