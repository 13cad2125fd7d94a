use thiserror::Error;

/// Failures an engine reports while performing a call.
#[derive(Debug, Error)]
pub enum Error {
    /// The URI was rejected by the engine.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
    /// Transport failure: connection, TLS, protocol or local I/O.
    #[error("IO Error: {0}")]
    Io(#[from] std::io::Error),
    /// The buffered body grew past the configured limit.
    #[error("Response body size exceeds max limit")]
    ResponseTooLarge,
    /// The call did not complete within the configured timeout.
    #[error("Request is not finished within timeout")]
    RequestTimeout,
}

/// Result of an engine operation.
pub type Result<T> = std::result::Result<T, Error>;
