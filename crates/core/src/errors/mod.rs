//! Error types and Result alias for the points workspace

use thiserror::Error;

/// Main error type shared by the widget, the clients and the relay
#[derive(Error, Debug)]
pub enum Error {
    /// Non-2xx response whose body could not be read as a business payload
    #[error("Upstream returned HTTP {status}: {body}")]
    UpstreamStatus { status: u16, body: String },

    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("Invalid data: {0}")]
    InvalidData(String),

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl Error {
    /// True for failures where no usable payload came back from the remote side
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            Error::NetworkError(_) | Error::InvalidData(_) | Error::UpstreamStatus { .. }
        )
    }
}

/// Result type alias using our Error
pub type Result<T> = std::result::Result<T, Error>;

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            Error::InvalidData(err.to_string())
        } else {
            Error::NetworkError(err.to_string())
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::InvalidData(err.to_string())
    }
}
