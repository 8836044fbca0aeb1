use reqwest::StatusCode;
use thiserror::Error;

/// Failure of a single chat round trip
#[derive(Debug, Error)]
pub enum ChatError {
    /// The request never got a response (connection refused, timeout, ...)
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The HTTP client could not be built (TLS backend, invalid settings)
    #[error("Could not set up HTTP client: {0}")]
    Setup(reqwest::Error),

    #[error("Server error {status}{}", format_body(.body))]
    Status { status: StatusCode, body: String },

    #[error("Could not read answer: {0}")]
    Decode(#[from] serde_json::Error),
}

fn format_body(body: &str) -> String {
    let body = body.trim();
    if body.is_empty() {
        String::new()
    } else {
        format!(": {}", body)
    }
}
