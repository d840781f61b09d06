use std::env;

pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";
pub const BASE_URL_ENV: &str = "PIMA_API_URL";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    base_url: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim().trim_end_matches('/').to_string();
        Self { base_url }
    }

    /// Base URL from `PIMA_API_URL`, falling back to the local default.
    pub fn from_env() -> Self {
        match env::var(BASE_URL_ENV) {
            Ok(url) if !url.trim().is_empty() => Self::new(url),
            _ => Self::default(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn predict_url(&self) -> String {
        format!("{}/predict", self.base_url)
    }

    pub fn root_url(&self) -> String {
        format!("{}/", self.base_url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trailing_slashes_are_dropped() {
        let config = ClientConfig::new("http://models.local:9000//");
        assert_eq!(config.base_url(), "http://models.local:9000");
        assert_eq!(config.predict_url(), "http://models.local:9000/predict");
        assert_eq!(config.root_url(), "http://models.local:9000/");
    }

    #[test]
    fn default_points_at_localhost() {
        assert_eq!(ClientConfig::default().predict_url(), "http://localhost:8000/predict");
    }
}
