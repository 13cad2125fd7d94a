//! Client construction.
//!
//! A [`ClientBuilder`] collects the serializer and the transport options, then builds a
//! [`crate::BlockingClient`] or a [`crate::AsyncClient`] from the registered engine.

mod builder;
mod error;

pub use builder::ClientBuilder;
pub use easyquest_interface::client::{
    BasicCredentials, ClientOptions, HttpVersion, ProxyPolicy, RedirectPolicy,
};
pub use error::{BuildClientError, BuildClientResult};
