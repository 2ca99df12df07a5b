use thiserror::Error;

/// Application-wide error type - single point of truth
#[derive(Error, Debug)]
pub enum AppError {
    /// Transaction retrieval (RPC or WhatsOnChain)
    #[error("Fetch error: {0}")]
    Fetch(#[from] FetchError),

    /// Locating or decoding OP_RETURN data
    #[error("Decoder error: {0}")]
    Decoder(#[from] crate::decoder::DecoderError),

    /// Configuration issues
    #[error("Configuration error: {0}")]
    Config(String),

    /// Data validation/parsing
    #[error("Invalid data: {0}")]
    InvalidData(String),
}

/// Transaction fetch error types
///
/// Shared by every backend so the CLI can report failures uniformly.
#[derive(Error, Debug)]
pub enum FetchError {
    /// Failed to establish a connection to the backend
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// TXID string format is invalid (not valid hex or wrong length)
    #[error("Invalid txid: {txid}")]
    InvalidTxid { txid: String },

    /// Backend call failed (covers network errors, authentication, HTTP status, etc.)
    #[error("Call failed: {method} - {message}")]
    CallFailed { method: String, message: String },

    /// Failed to deserialise response data
    #[error("Deserialisation failed: {0}")]
    DeserialisationFailed(String),

    /// Retry limit exceeded
    #[error("Max retries exceeded: {operation}")]
    MaxRetriesExceeded { operation: String },

    /// Request timed out
    #[error("Request timeout: {timeout_seconds}s for {operation}")]
    Timeout {
        timeout_seconds: u64,
        operation: String,
    },

    /// Backend returned unexpected or malformed response data
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Transaction id is well formed but unknown to the backend
    #[error("Transaction not found: {txid}")]
    TransactionNotFound { txid: String },
}

impl FetchError {
    /// Whether another attempt could plausibly succeed
    pub fn is_retryable(&self) -> bool {
        !matches!(
            self,
            FetchError::InvalidTxid { .. }
                | FetchError::TransactionNotFound { .. }
                | FetchError::DeserialisationFailed(_)
                | FetchError::InvalidResponse(_)
        )
    }
}

/// Application-wide result type - single point of truth
pub type AppResult<T> = Result<T, AppError>;

/// Result type for fetch operations
pub type FetchResult<T> = Result<T, FetchError>;

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::InvalidData(format!("JSON error: {}", err))
    }
}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        AppError::Config(err.to_string())
    }
}
