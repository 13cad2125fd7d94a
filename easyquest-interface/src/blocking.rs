//! Blocking engine contract.
//!
//! Engines implement [`BlockingBackend`], [`BlockingClient`] and [`BlockingResponse`]; the
//! `Any*` mirrors come for free.

mod any;
mod backend;
mod body;

pub use any::{AnyBlockingBackend, AnyBlockingClient, AnyBlockingResponse, BoxedBlockingResponse};
pub use backend::{BlockingBackend, BlockingClient, BlockingResponse};
pub use body::{Body, BodyStream, BoxedStream};

/// A resolved request with a blocking body stream.
pub type Request = crate::Request<body::BoxedStream>;
