/*
[INPUT]:  Error sources (configuration, signing, HTTP, validation, WebSocket)
[OUTPUT]: One error taxonomy shared by the REST client and the stream session
[POS]:    Error handling layer - unified error types for entire crate
[UPDATE]: When adding new error sources or improving error messages
*/

use reqwest::StatusCode;
use thiserror::Error;

const TIMEOUT_MESSAGE: &str = "request timed out";

/// Main error type for the Binance adapter
#[derive(Error, Debug)]
pub enum BinanceError {
    /// Bad construction-time arguments (credentials, URLs, durations)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Request signature could not be computed
    #[error("Signing error: {0}")]
    Signing(String),

    /// Any REST call failure: error status, timeout or transport fault
    #[error("API error: {message}")]
    Api {
        status: Option<u16>,
        code: Option<i64>,
        message: String,
    },

    /// Operation arguments rejected before any network action
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Streaming connection could not be established
    #[error("Stream error: {0}")]
    Stream(String),
}

impl BinanceError {
    /// Create an API error from status code and message
    pub fn api_error(status: StatusCode, message: impl Into<String>) -> Self {
        BinanceError::Api {
            status: Some(status.as_u16()),
            code: None,
            message: message.into(),
        }
    }

    /// API error raised when the per-call timeout elapses
    pub fn timeout() -> Self {
        BinanceError::Api {
            status: None,
            code: None,
            message: TIMEOUT_MESSAGE.to_string(),
        }
    }

    /// Map a transport-level failure into the API error kind
    pub fn from_transport(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            return Self::timeout();
        }
        BinanceError::Api {
            status: err.status().map(|status| status.as_u16()),
            code: None,
            message: format!("request failed: {err}"),
        }
    }

    /// Check if the error came from an elapsed request timeout
    pub fn is_timeout(&self) -> bool {
        matches!(self, BinanceError::Api { status: None, message, .. } if message.ends_with(TIMEOUT_MESSAGE))
    }

    /// Exchange error code (e.g. `-1121`), when the body carried one
    pub fn api_code(&self) -> Option<i64> {
        match self {
            BinanceError::Api { code, .. } => *code,
            _ => None,
        }
    }

    /// Prefix the message with the failing operation, keeping the variant
    pub fn with_operation(self, operation: &str) -> Self {
        let label = |message: String| format!("failed to {operation}: {message}");
        match self {
            BinanceError::Config(message) => BinanceError::Config(label(message)),
            BinanceError::Signing(message) => BinanceError::Signing(label(message)),
            BinanceError::Api {
                status,
                code,
                message,
            } => BinanceError::Api {
                status,
                code,
                message: label(message),
            },
            BinanceError::InvalidArgument(message) => {
                BinanceError::InvalidArgument(label(message))
            }
            BinanceError::Stream(message) => BinanceError::Stream(label(message)),
        }
    }
}

/// Result type alias for adapter operations
pub type Result<T> = std::result::Result<T, BinanceError>;
