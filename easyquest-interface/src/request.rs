use std::borrow::Cow;
use std::fmt;

use crate::body::Body;

/// HTTP methods understood by engines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    /// `GET`
    Get,
    /// `POST`
    Post,
    /// `PUT`
    Put,
    /// `PATCH`
    Patch,
    /// `DELETE`
    Delete,
    /// `HEAD`
    Head,
}

impl Method {
    /// The method token as sent on the wire.
    pub const fn as_str(self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Patch => "PATCH",
            Method::Delete => "DELETE",
            Method::Head => "HEAD",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A fully resolved request ready to go on the wire.
///
/// `uri` is always absolute. Headers are applied in order; the facade has already collapsed
/// duplicate names.
pub struct Request<S> {
    /// The request method.
    pub method: Method,
    /// The absolute request URI.
    pub uri: String,
    /// Request headers, in the order they should be applied.
    pub headers: Vec<(Cow<'static, str>, Cow<'static, str>)>,
    /// The encoded request body, if any.
    pub body: Option<Body<S>>,
}

impl<S> fmt::Debug for Request<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Request")
            .field("method", &self.method)
            .field("uri", &self.uri)
            .field("headers", &self.headers)
            .field("body", &self.body.as_ref().map(Body::kind))
            .finish()
    }
}
