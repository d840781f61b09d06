mod client;
mod config;
mod error;

pub use client::{PredictionClient, ServiceInfo, decode_prediction};
pub use config::{BASE_URL_ENV, ClientConfig, DEFAULT_BASE_URL};
pub use error::ClientError;
