use thiserror::Error;

/// Main error type for BusChat
#[derive(Error, Debug)]
pub enum BusChatError {
    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),

    #[error("Directions service returned HTTP {0}")]
    HttpStatus(u16),

    #[error("Failed to decode directions response: {0}")]
    DecodeError(#[from] serde_json::Error),

    /// The service answered with an `error` value other than the no-routes marker
    #[error("Directions service reported an error: {0}")]
    ServiceError(String),

    #[error("Malformed directions response: {0}")]
    MalformedResponse(String),

    #[error("UI error: {0}")]
    UIError(String),
}
