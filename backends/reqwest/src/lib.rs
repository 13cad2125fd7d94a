//! <style>
//! .rustdoc-hidden { display: none; }
//! </style>

#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg))]

#[cfg(feature = "async")]
#[cfg_attr(docsrs, doc(cfg(feature = "async")))]
mod r#async;
#[cfg(feature = "blocking")]
#[cfg_attr(docsrs, doc(cfg(feature = "blocking")))]
mod blocking;
mod client;
mod error;
mod request;
mod response;
mod stream;

use easyquest_interface::client::ClientOptions;
use easyquest_interface::{register_backend, Result};
use tokio::runtime::Handle;

/// The engine implementation using reqwest.
///
/// Requests issued outside a tokio runtime run on the runtime given at registration, or on a
/// small runtime owned by each client when none was given.
#[derive(Debug, Clone, Default)]
pub struct ReqwestBackend {
    runtime: Option<Handle>,
}

impl ReqwestBackend {
    /// An engine that runs requests on `handle` when the caller is not inside a runtime.
    pub fn with_runtime(handle: Handle) -> Self {
        Self {
            runtime: Some(handle),
        }
    }
}

#[cfg(feature = "async")]
impl easyquest_interface::r#async::AsyncBackend for ReqwestBackend {
    type AsyncClient = r#async::ReqwestAsyncClient;

    async fn create_async_client(&self, options: ClientOptions) -> Result<Self::AsyncClient> {
        r#async::ReqwestAsyncClient::new(options, self.runtime.clone())
    }
}

#[cfg(feature = "blocking")]
impl easyquest_interface::blocking::BlockingBackend for ReqwestBackend {
    type BlockingClient = blocking::ReqwestBlockingClient;

    fn create_blocking_client(&self, options: ClientOptions) -> Result<Self::BlockingClient> {
        blocking::ReqwestBlockingClient::new(options, self.runtime.clone())
    }
}

/// Registers the reqwest engine as global default.
pub fn register() {
    register_backend(ReqwestBackend::default());
}

/// Registers the reqwest engine as global default, running requests issued outside a tokio
/// runtime on `handle`.
pub fn register_with_runtime(handle: Handle) {
    register_backend(ReqwestBackend::with_runtime(handle));
}
