//! `async` client support.
//!
//! Futures returned by [`AsyncClient`](crate::AsyncClient) are `Send` and run on whatever
//! executor the engine picked at registration.

use std::fmt;
use std::io;
use std::sync::Arc;

use easyquest_interface::r#async::{futures_io, BoxedStream};

mod async_read_stream;
pub(crate) mod client;
mod response;

pub use async_read_stream::AsyncReadStream;

type OpenFn = dyn Fn() -> io::Result<BoxedStream> + Send + Sync;

/// Opens a fresh async reader for a stream body each time the request is sent.
#[derive(Clone)]
pub struct StreamSource {
    open: Arc<OpenFn>,
}

impl StreamSource {
    /// Wraps a factory returning a new reader on every call.
    pub fn new<F, R>(factory: F) -> Self
    where
        F: Fn() -> io::Result<R> + Send + Sync + 'static,
        R: futures_io::AsyncRead + Send + Sync + Unpin + 'static,
    {
        Self {
            open: Arc::new(move || Ok(Box::new(factory()?) as BoxedStream)),
        }
    }

    pub(crate) fn open(&self) -> io::Result<BoxedStream> {
        (self.open)()
    }
}

impl fmt::Debug for StreamSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("StreamSource")
    }
}

/// The request body type for async requests.
pub type Body = crate::body::Body<StreamSource>;
/// The request type for async requests.
pub type Request = crate::Request<StreamSource>;
/// The request builder type for async requests.
pub type RequestBuilder = crate::RequestBuilder<StreamSource>;
/// The response type for async requests.
pub type Response<T> = crate::Response<T>;

impl crate::body::Body<StreamSource> {
    /// A body read from an async reader opened by `factory` each time the request is sent.
    pub fn stream<F, R>(factory: F) -> Self
    where
        F: Fn() -> io::Result<R> + Send + Sync + 'static,
        R: futures_io::AsyncRead + Send + Sync + Unpin + 'static,
    {
        Self::Stream(StreamSource::new(factory))
    }
}
