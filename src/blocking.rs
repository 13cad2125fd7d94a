//! Blocking client support.
//!
//! The blocking client will block the current thread to execute.
//!

use std::fmt;
use std::io;
use std::sync::Arc;

use easyquest_interface::blocking::BoxedStream;

pub(crate) mod client;
mod read_stream;
mod response;

pub use read_stream::ReadStream;

type OpenFn = dyn Fn() -> io::Result<BoxedStream> + Send + Sync;

/// Opens a fresh reader for a stream body each time the request is sent.
#[derive(Clone)]
pub struct StreamSource {
    open: Arc<OpenFn>,
}

impl StreamSource {
    /// Wraps a factory returning a new reader on every call.
    pub fn new<F, R>(factory: F) -> Self
    where
        F: Fn() -> io::Result<R> + Send + Sync + 'static,
        R: io::Read + Send + Sync + 'static,
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

/// The request body type for blocking requests.
pub type Body = crate::body::Body<StreamSource>;
/// The request type for blocking requests.
pub type Request = crate::Request<StreamSource>;
/// The request builder type for blocking requests.
pub type RequestBuilder = crate::RequestBuilder<StreamSource>;
/// The response type for blocking requests.
pub type Response<T> = crate::Response<T>;

impl crate::body::Body<StreamSource> {
    /// A body read from a reader opened by `factory` each time the request is sent.
    pub fn stream<F, R>(factory: F) -> Self
    where
        F: Fn() -> io::Result<R> + Send + Sync + 'static,
        R: io::Read + Send + Sync + 'static,
    {
        Self::Stream(StreamSource::new(factory))
    }
}
