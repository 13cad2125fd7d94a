//! Configuration options for HTTP clients.

use std::fmt;
use std::time::Duration;

/// Whether and how redirect responses are followed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RedirectPolicy {
    /// Never follow redirects.
    Never,
    /// Follow redirects, except from HTTPS to HTTP.
    #[default]
    Normal,
    /// Always follow redirects.
    Always,
}

/// Proxy selection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ProxyPolicy {
    /// Use the proxy settings of the system environment.
    #[default]
    System,
    /// Connect directly.
    NoProxy,
    /// Send all traffic through the given proxy URL.
    All(String),
}

/// HTTP protocol version preference.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum HttpVersion {
    /// Let the engine negotiate.
    #[default]
    Auto,
    /// Only speak HTTP/1.x.
    Http1Only,
    /// Speak HTTP/2, assuming the server supports it.
    Http2,
}

/// Username and password attached to requests that carry no `Authorization` header.
#[derive(Clone, PartialEq, Eq)]
pub struct BasicCredentials {
    /// The username.
    pub username: String,
    /// The password, if any.
    pub password: Option<String>,
}

impl fmt::Debug for BasicCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BasicCredentials")
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "***"))
            .finish()
    }
}

/// Configuration options for creating an engine client.
#[derive(Debug, Clone)]
pub struct ClientOptions {
    /// Optional User-Agent header value to use for all requests.
    pub user_agent: Option<String>,
    /// Headers to include in all requests by default.
    pub default_headers: Vec<(String, String)>,
    /// Proxy selection.
    pub proxy: ProxyPolicy,
    /// Whether to keep a session cookie store.
    pub use_cookies: bool,
    /// Redirect handling.
    pub redirect_policy: RedirectPolicy,
    /// Optional maximum buffer size for response bodies.
    pub max_response_buffer_size: Option<u64>,
    /// Optional timeout for establishing a connection.
    pub connect_timeout: Option<Duration>,
    /// Optional deadline for a whole request, including reading the response body.
    pub request_timeout: Option<Duration>,
    /// Skip server certificate validation.
    pub ignore_certificate_errors: bool,
    /// Extra PEM encoded root certificates to trust.
    pub root_certificates: Vec<Vec<u8>>,
    /// Credentials used when a request has no `Authorization` header.
    pub basic_auth: Option<BasicCredentials>,
    /// Protocol version preference.
    pub http_version: HttpVersion,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            user_agent: None,
            default_headers: vec![],
            proxy: ProxyPolicy::default(),
            use_cookies: true,
            redirect_policy: RedirectPolicy::default(),
            max_response_buffer_size: None,
            connect_timeout: None,
            request_timeout: None,
            ignore_certificate_errors: false,
            root_certificates: vec![],
            basic_auth: None,
            http_version: HttpVersion::default(),
        }
    }
}
