use std::sync::Arc;
use std::time::Duration;

use super::{BasicCredentials, ClientOptions, HttpVersion, ProxyPolicy, RedirectPolicy};
use crate::serializer::{JsonSerializer, Serializer};

/// Builds clients with a serializer and transport options.
///
/// The options are frozen when a client is built; they cannot be changed per call.
#[derive(Debug, Clone, Default)]
pub struct ClientBuilder {
    pub(crate) options: ClientOptions,
    serializer: Option<Arc<dyn Serializer>>,
}

impl ClientBuilder {
    /// Replaces the serializer used for structured bodies. Defaults to [`JsonSerializer`].
    pub fn serializer(mut self, serializer: Arc<dyn Serializer>) -> Self {
        self.serializer = Some(serializer);
        self
    }

    /// Sets the timeout for establishing a connection.
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.options.connect_timeout = Some(timeout);
        self
    }

    /// Sets the deadline for a whole call, including reading the response body.
    pub fn request_timeout(mut self, timeout: Duration) -> Self {
        self.options.request_timeout = Some(timeout);
        self
    }

    /// Sets how redirects are followed.
    pub fn follow_redirects(mut self, policy: RedirectPolicy) -> Self {
        self.options.redirect_policy = policy;
        self
    }

    /// Sets how a proxy is selected.
    pub fn proxy(mut self, proxy: ProxyPolicy) -> Self {
        self.options.proxy = proxy;
        self
    }

    /// Accepts any server certificate.
    pub fn ignore_certificate_errors(mut self) -> Self {
        self.options.ignore_certificate_errors = true;
        self
    }

    /// Trusts an extra PEM encoded root certificate.
    pub fn add_root_certificate_pem(mut self, pem: impl Into<Vec<u8>>) -> Self {
        self.options.root_certificates.push(pem.into());
        self
    }

    /// Authenticates with HTTP basic credentials on every request without its own
    /// `authorization` header.
    pub fn basic_auth(mut self, username: impl Into<String>, password: Option<String>) -> Self {
        self.options.basic_auth = Some(BasicCredentials {
            username: username.into(),
            password,
        });
        self
    }

    /// Sets the HTTP protocol version preference.
    pub fn http_version(mut self, version: HttpVersion) -> Self {
        self.options.http_version = version;
        self
    }

    /// Disables the session cookie store.
    pub fn no_cookies(mut self) -> Self {
        self.options.use_cookies = false;
        self
    }

    /// Sets the default `user-agent`.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.options.user_agent = Some(user_agent.into());
        self
    }

    /// Adds a header sent with every request. A request header of the same name takes
    /// precedence.
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.options
            .default_headers
            .push((name.into(), value.into()));
        self
    }

    /// Caps the size of buffered response bodies. Streams and files are not capped.
    pub fn max_response_buffer_size(mut self, size: u64) -> Self {
        self.options.max_response_buffer_size = Some(size);
        self
    }

    pub(crate) fn into_parts(self) -> (ClientOptions, Arc<dyn Serializer>) {
        let serializer = self
            .serializer
            .unwrap_or_else(|| Arc::new(JsonSerializer) as Arc<dyn Serializer>);
        (self.options, serializer)
    }
}
