use std::io;

use easyquest_interface::Error as EngineError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReqwestBackendError {
    #[error("reqwest error: {0}")]
    Reqwest(#[from] reqwest::Error),
    #[error("tokio error: {0}")]
    Tokio(#[from] tokio::task::JoinError),
    #[error("response too large")]
    ResponseTooLarge,
    #[error("invalid header name: {0}")]
    InvalidHeaderName(String),
    #[error("invalid header value for {0}")]
    InvalidHeaderValue(String),
    #[error("invalid URL: {0}")]
    InvalidUrl(String),
    #[error("invalid proxy {0}: {1}")]
    InvalidProxy(String, #[source] reqwest::Error),
    #[error("invalid root certificate: {0}")]
    InvalidCertificate(#[source] reqwest::Error),
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

impl From<ReqwestBackendError> for EngineError {
    fn from(err: ReqwestBackendError) -> Self {
        match err {
            ReqwestBackendError::Reqwest(e) if e.is_timeout() => EngineError::RequestTimeout,
            ReqwestBackendError::ResponseTooLarge => EngineError::ResponseTooLarge,
            ReqwestBackendError::InvalidUrl(url) => EngineError::InvalidUrl(url),
            ReqwestBackendError::Io(e) => EngineError::Io(e),
            other => EngineError::Io(io::Error::other(other)),
        }
    }
}

pub type Result<T> = std::result::Result<T, ReqwestBackendError>;
