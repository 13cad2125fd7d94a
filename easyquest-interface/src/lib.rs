//! HTTP engine contract for easyquest.
//!
//! The `easyquest` facade turns a declarative request into a [`Request`] with an absolute URI,
//! ordered headers and an encoded [`Body`], then hands it to an engine through the traits of
//! this crate. Sockets, TLS, redirects, proxies and pooling all live on the engine side.
//!
//! An engine implements the traits of [`blocking`], [`r#async`] or both, and makes itself
//! available with [`register_backend`] before the first client is built.
//!
//! ## Features
//!
//! - `async`: the async contract
//! - `blocking`: the blocking contract

#![cfg_attr(docsrs, feature(doc_cfg))]
#![deny(missing_docs)]

#[cfg(feature = "async")]
#[cfg_attr(docsrs, doc(cfg(feature = "async")))]
pub mod r#async;
#[cfg(feature = "blocking")]
#[cfg_attr(docsrs, doc(cfg(feature = "blocking")))]
pub mod blocking;
pub mod body;
pub mod client;
mod error;
#[doc(hidden)]
pub mod register;
mod request;
mod response;

pub use body::{Body, StreamReader};
pub use error::{Error, Result};
pub use register::{register_backend, try_register_backend};
pub use request::{Method, Request};
pub use response::ResponseHead;
