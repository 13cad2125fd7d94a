//! Async engine contract.
//!
//! Futures returned by engines must be `Send` and must not require the caller to run any
//! particular executor.

mod any;
mod backend;
mod body;

pub use futures_io;

pub use any::{AnyAsyncBackend, AnyAsyncClient, AnyAsyncResponse, BoxedAsyncResponse};
pub use backend::{AsyncBackend, AsyncClient, AsyncResponse};
pub use body::{Body, BodyStream, BoxedStream};

/// A resolved request with an async body stream.
pub type Request = crate::Request<body::BoxedStream>;
