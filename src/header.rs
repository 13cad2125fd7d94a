//! Names of the request headers with a dedicated setter on [`crate::RequestBuilder`].
//!
//! Names are lowercase. Engines compare header names case-insensitively, so a header set
//! under any other casing still replaces these.

/// Content types the client is able to understand.
pub const ACCEPT: &str = "accept";
/// Content encodings, usually compression algorithms, the client is able to understand.
pub const ACCEPT_ENCODING: &str = "accept-encoding";
/// Languages the client prefers, most preferred first.
pub const ACCEPT_LANGUAGE: &str = "accept-language";
/// Credentials authenticating the client with the server.
pub const AUTHORIZATION: &str = "authorization";
/// Media type of the request body.
pub const CONTENT_TYPE: &str = "content-type";
/// Cookies previously received through `set-cookie`.
pub const COOKIE: &str = "cookie";
/// Where a cross-origin request originates from.
pub const ORIGIN: &str = "origin";
/// Address of the page the request was issued from.
pub const REFERER: &str = "referer";
/// Product identification of the client.
pub const USER_AGENT: &str = "user-agent";
