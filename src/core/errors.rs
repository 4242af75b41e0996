use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExchangeError {
    #[error("API error: {code} - {message}")]
    ApiError { code: i32, message: String },

    #[error("HTTP status {status}: {message}")]
    HttpStatusError { status: u16, message: String },

    #[error("Authentication error: {0}")]
    AuthError(String),

    #[error("Rate limit exceeded: {0}")]
    RateLimitExceeded(String),

    #[error("Invalid parameters: {0}")]
    InvalidParameters(String),

    #[error("Server error: {0}")]
    ServerError(String),

    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("Deserialization error: {0}")]
    DeserializationError(String),

    #[error("Invalid response format: {0}")]
    InvalidResponseFormat(String),

    #[error("Instrument not found: {0}")]
    InstrumentNotFound(String),

    #[error("No {side} position found for {symbol}")]
    PositionNotFound { symbol: String, side: String },

    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    #[error("Configuration error: {0}")]
    ConfigError(#[from] crate::core::config::ConfigError),
}
