use thiserror::Error;

#[derive(Debug, Error)]
pub enum InfraError {
    #[error("telemetry initialization failed: {0}")]
    Telemetry(String),
    #[error("http client could not be built: {0}")]
    HttpClient(#[from] reqwest::Error),
    #[error("dashboard location is not a valid URL: {0}")]
    Location(#[from] url::ParseError),
}

impl InfraError {
    pub fn telemetry(message: impl Into<String>) -> Self {
        Self::Telemetry(message.into())
    }
}
