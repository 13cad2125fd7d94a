use std::io;
use std::path::PathBuf;

use thiserror::Error;

use easyquest_interface::Error as ErrorImpl;

use crate::StatusCode;

/// A boxed error raised by a [`crate::Serializer`].
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// The errors produced while describing, sending or decoding a request.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    /// The request description is incomplete. Raised by [`crate::RequestBuilder::build`] before
    /// anything touches the network.
    #[error("Invalid request: {0}")]
    InvalidRequest(&'static str),
    /// The assembled URL is not a valid absolute URL.
    #[error("Malformed URL {url:?}: {source}")]
    MalformedUrl {
        /// The URL string after parameter substitution.
        url: String,
        /// Why the URL was rejected.
        #[source]
        source: crate::url::UrlError,
    },
    /// The serializer failed to encode a structured request body.
    #[error("Failed to serialize request body: {0}")]
    Serialization(#[source] BoxError),
    /// The serializer failed to decode a structured response body, or the decoded value does not
    /// fit the requested type.
    #[error("Failed to deserialize response body: {0}")]
    Deserialization(#[source] BoxError),
    /// A file used as a request body does not resolve to a readable file.
    #[error("File not found: {}", path.display())]
    FileNotFound {
        /// The path given for the body.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: io::Error,
    },
    /// The HTTP engine failed to carry out the call.
    #[error("HTTP call failed: {0}")]
    HttpCall(#[from] ErrorImpl),
    /// The response status is not in the 2xx range. Only returned by
    /// `with_successful_status`.
    #[error("Server returned non-successful status code {0}")]
    NonSuccessfulStatusCode(StatusCode),
}

/// A `Result` alias where the `Err` case is [`crate::Error`].
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub(crate) fn http_io(e: io::Error) -> Self {
        Self::HttpCall(ErrorImpl::Io(e))
    }
}
