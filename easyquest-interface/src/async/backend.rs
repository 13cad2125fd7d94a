//! The traits an async engine implements.

use std::fmt;
use std::future::Future;
use std::pin::Pin;

use super::Request;
use crate::client::ClientOptions;
use crate::{ResponseHead, Result};

/// Creates async clients from frozen [`ClientOptions`].
pub trait AsyncBackend: Send + Sync + 'static {
    /// The client this engine hands out.
    type AsyncClient: AsyncClient;

    /// Builds a client. Options the engine cannot honour are reported here, not on the first
    /// call.
    fn create_async_client(
        &self,
        options: ClientOptions,
    ) -> impl Future<Output = Result<Self::AsyncClient>> + Send;
}

/// Performs one HTTP call per [`AsyncClient::request`].
///
/// Clones share the connection pool and every other resource of the client.
pub trait AsyncClient: Clone + Send + Sync + 'static {
    /// The response handed back once the head has arrived.
    type Response: AsyncResponse;

    /// Writes a short description for `Debug` output.
    fn describe(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AsyncClient")
    }

    /// Sends `req`, resolving once the response head has arrived.
    fn request(&self, req: Request) -> impl Future<Output = Result<Self::Response>> + Send;
}

/// A response whose head has arrived while the body may still be on the wire.
///
/// The body is consumed once, either incrementally through [`futures_io::AsyncRead`] or in one
/// piece through [`AsyncResponse::read_all`]. The pinned receiver keeps the trait object safe.
pub trait AsyncResponse: futures_io::AsyncRead + Send + Sync + 'static {
    /// Writes a short description for `Debug` output.
    fn describe(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AsyncResponse")
    }

    /// Status line and headers.
    fn head(&self) -> ResponseHead;

    /// Buffers the remaining body, failing with [`crate::Error::ResponseTooLarge`] past
    /// [`ClientOptions::max_response_buffer_size`].
    fn read_all(self: Pin<&mut Self>) -> impl Future<Output = Result<Vec<u8>>> + Send;
}
