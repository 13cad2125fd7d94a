//! Object-safe mirrors of the async engine traits.
//!
//! The facade keeps engines, clients and responses behind these traits. Each is implemented
//! for every type implementing its counterpart in [`super::backend`]; futures are boxed on the
//! way through.

use std::fmt;
use std::pin::Pin;
use std::sync::Arc;

use futures_core::future::BoxFuture;
use futures_io::AsyncRead;

use super::backend::{AsyncBackend, AsyncClient, AsyncResponse};
use super::Request;
use crate::client::ClientOptions;
use crate::{ResponseHead, Result};

/// A type-erased async response.
pub type BoxedAsyncResponse = Pin<Box<dyn AnyAsyncResponse>>;

/// Object-safe form of [`AsyncBackend`].
pub trait AnyAsyncBackend: Send + Sync + 'static {
    /// See [`AsyncBackend::create_async_client`].
    fn create_async_client(
        &self,
        options: ClientOptions,
    ) -> BoxFuture<'_, Result<Arc<dyn AnyAsyncClient>>>;
}

/// Object-safe form of [`AsyncClient`].
pub trait AnyAsyncClient: Send + Sync + 'static {
    /// See [`AsyncClient::describe`].
    fn describe(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result;
    /// See [`AsyncClient::request`].
    fn request(&self, req: Request) -> BoxFuture<'_, Result<BoxedAsyncResponse>>;
}

/// Object-safe form of [`AsyncResponse`].
pub trait AnyAsyncResponse: AsyncRead + Send + Sync + 'static {
    /// See [`AsyncResponse::describe`].
    fn describe(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result;
    /// See [`AsyncResponse::head`].
    fn head(&self) -> ResponseHead;
    /// See [`AsyncResponse::read_all`].
    fn read_all(self: Pin<&mut Self>) -> BoxFuture<'_, Result<Vec<u8>>>;
}

impl<B: AsyncBackend> AnyAsyncBackend for B {
    fn create_async_client(
        &self,
        options: ClientOptions,
    ) -> BoxFuture<'_, Result<Arc<dyn AnyAsyncClient>>> {
        Box::pin(async move {
            let client = AsyncBackend::create_async_client(self, options).await?;
            Ok(Arc::new(client) as Arc<dyn AnyAsyncClient>)
        })
    }
}

impl<C: AsyncClient> AnyAsyncClient for C {
    fn describe(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        AsyncClient::describe(self, f)
    }

    fn request(&self, req: Request) -> BoxFuture<'_, Result<BoxedAsyncResponse>> {
        Box::pin(async move {
            let res = AsyncClient::request(self, req).await?;
            Ok(Box::pin(res) as BoxedAsyncResponse)
        })
    }
}

impl<R: AsyncResponse> AnyAsyncResponse for R {
    fn describe(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        AsyncResponse::describe(self, f)
    }

    fn head(&self) -> ResponseHead {
        AsyncResponse::head(self)
    }

    fn read_all(self: Pin<&mut Self>) -> BoxFuture<'_, Result<Vec<u8>>> {
        Box::pin(AsyncResponse::read_all(self))
    }
}
