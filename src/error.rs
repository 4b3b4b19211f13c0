use thiserror::Error as ThisError;

/// Failure at a single upstream fetch boundary.
///
/// Every source maps each variant to its own documented default, so none of
/// these ever reach an HTTP response.
#[derive(ThisError, Debug, Clone, PartialEq)]
pub enum UpstreamError {
    /// Timeout, refused connection, or a body that could not be read
    #[error("Transport error: {0}")]
    Transport(String),

    /// Upstream answered with a non-success status code
    #[error("Unexpected status code {0}")]
    Status(u16),

    /// Body was not the JSON shape we expected
    #[error("Payload error: {0}")]
    Payload(String),
}

#[derive(ThisError, Debug)]
pub enum AppError {
    #[error("IO error: {0}")]
    Io(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Server error: {0}")]
    Server(String),
}

impl From<tokio::io::Error> for AppError {
    fn from(err: tokio::io::Error) -> Self {
        AppError::Io(err.to_string())
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Io(format!("JSON error: {}", err))
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
