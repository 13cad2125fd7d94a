use thiserror::Error;

use easyquest_interface::Error as ErrorImpl;

/// The errors produced when building a client.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum BuildClientError {
    /// No engine registered.
    #[error("No backend registered. Please find a backend crate (e.g. easyquest-backend-reqwest) and call the `register` method at program startup.")]
    NoBackend,
    /// The engine has returned an error while creating the client.
    #[error("Error creating client: {0}")]
    BackendError(#[from] ErrorImpl),
}

/// A `Result` alias where the `Err` case is [`BuildClientError`].
pub type BuildClientResult<T> = Result<T, BuildClientError>;
