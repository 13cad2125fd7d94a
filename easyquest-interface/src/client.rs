//! Engine client configuration.
//!
//! This module provides the options an engine receives when a client is built. The facade
//! passes them through without interpreting them.

mod options;

pub use options::{BasicCredentials, ClientOptions, HttpVersion, ProxyPolicy, RedirectPolicy};
