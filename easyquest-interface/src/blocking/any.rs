//! Object-safe mirrors of the blocking engine traits.
//!
//! The facade keeps engines, clients and responses behind these traits. Each is implemented
//! for every type implementing its counterpart in [`super::backend`].

use std::fmt;
use std::io;
use std::sync::Arc;

use super::backend::{BlockingBackend, BlockingClient, BlockingResponse};
use super::Request;
use crate::client::ClientOptions;
use crate::{ResponseHead, Result};

/// A type-erased blocking response.
pub type BoxedBlockingResponse = Box<dyn AnyBlockingResponse>;

/// Object-safe form of [`BlockingBackend`].
pub trait AnyBlockingBackend: Send + Sync + 'static {
    /// See [`BlockingBackend::create_blocking_client`].
    fn create_blocking_client(&self, options: ClientOptions) -> Result<Arc<dyn AnyBlockingClient>>;
}

/// Object-safe form of [`BlockingClient`].
pub trait AnyBlockingClient: Send + Sync + 'static {
    /// See [`BlockingClient::describe`].
    fn describe(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result;
    /// See [`BlockingClient::request`].
    fn request(&self, req: Request) -> Result<BoxedBlockingResponse>;
}

/// Object-safe form of [`BlockingResponse`].
pub trait AnyBlockingResponse: io::Read + Send + Sync + 'static {
    /// See [`BlockingResponse::describe`].
    fn describe(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result;
    /// See [`BlockingResponse::head`].
    fn head(&self) -> ResponseHead;
    /// See [`BlockingResponse::read_all`].
    fn read_all(&mut self) -> Result<Vec<u8>>;
}

impl<B: BlockingBackend> AnyBlockingBackend for B {
    fn create_blocking_client(&self, options: ClientOptions) -> Result<Arc<dyn AnyBlockingClient>> {
        let client = BlockingBackend::create_blocking_client(self, options)?;
        Ok(Arc::new(client))
    }
}

impl<C: BlockingClient> AnyBlockingClient for C {
    fn describe(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        BlockingClient::describe(self, f)
    }

    fn request(&self, req: Request) -> Result<BoxedBlockingResponse> {
        let res = BlockingClient::request(self, req)?;
        Ok(Box::new(res))
    }
}

impl<R: BlockingResponse> AnyBlockingResponse for R {
    fn describe(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        BlockingResponse::describe(self, f)
    }

    fn head(&self) -> ResponseHead {
        BlockingResponse::head(self)
    }

    fn read_all(&mut self) -> Result<Vec<u8>> {
        BlockingResponse::read_all(self)
    }
}
