//! The traits a blocking engine implements.

use std::{fmt, io};

use super::Request;
use crate::client::ClientOptions;
use crate::{ResponseHead, Result};

/// Creates blocking clients from frozen [`ClientOptions`].
pub trait BlockingBackend: Send + Sync + 'static {
    /// The client this engine hands out.
    type BlockingClient: BlockingClient;

    /// Builds a client. Options the engine cannot honour are reported here, not on the first
    /// call.
    fn create_blocking_client(&self, options: ClientOptions) -> Result<Self::BlockingClient>;
}

/// Performs one HTTP call per [`BlockingClient::request`].
///
/// Clones share the connection pool and every other resource of the client.
pub trait BlockingClient: Clone + Send + Sync + 'static {
    /// The response handed back once the head has arrived.
    type Response: BlockingResponse;

    /// Writes a short description for `Debug` output.
    fn describe(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("BlockingClient")
    }

    /// Sends `req`, blocking until the response head has arrived.
    fn request(&self, req: Request) -> Result<Self::Response>;
}

/// A response whose head has arrived while the body may still be on the wire.
///
/// The body is consumed once, either incrementally through [`io::Read`] or in one piece
/// through [`BlockingResponse::read_all`].
pub trait BlockingResponse: io::Read + Send + Sync + 'static {
    /// Writes a short description for `Debug` output.
    fn describe(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("BlockingResponse")
    }

    /// Status line and headers.
    fn head(&self) -> ResponseHead;

    /// Buffers the remaining body, failing with [`crate::Error::ResponseTooLarge`] past
    /// [`ClientOptions::max_response_buffer_size`].
    fn read_all(&mut self) -> Result<Vec<u8>>;
}
