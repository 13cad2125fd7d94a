use std::borrow::Cow;
use std::fmt;

use crate::body::Body;
use crate::header;
use crate::{Error, Result};

pub use easyquest_interface::Method;

mod params;

pub use params::{Iter as ParamIter, ParamMap};

/// An immutable description of one HTTP call.
///
/// Built through [`RequestBuilder`], which validates that the URL template is not blank and
/// that a method is set. A `Request` has no setters and can be sent any number of times, from
/// any number of threads when `S` allows it.
///
/// `S` is the stream source type of the blocking or async flavour; use the aliases
/// [`crate::blocking::Request`] and [`crate::r#async::Request`].
pub struct Request<S> {
    url: String,
    method: Method,
    path_params: ParamMap,
    query_params: ParamMap,
    headers: ParamMap,
    fragment: Option<String>,
    body: Body<S>,
}

/// Collects the parts of a [`Request`].
///
/// Every setter consumes and returns the builder. Setting a key twice keeps the last value.
pub struct RequestBuilder<S> {
    url: String,
    method: Option<Method>,
    path_params: ParamMap,
    query_params: ParamMap,
    headers: ParamMap,
    fragment: Option<String>,
    body: Body<S>,
}

impl<S> Request<S> {
    /// Starts describing a request to the URL template `url`.
    ///
    /// The template may contain `{name}` tokens replaced by path parameters when the request is
    /// sent.
    pub fn builder(url: impl Into<String>) -> RequestBuilder<S> {
        RequestBuilder::new(url)
    }

    /// The URL template, as given to the builder.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// The request method.
    pub fn method(&self) -> Method {
        self.method
    }

    /// Values substituted for `{name}` tokens in the URL template.
    pub fn path_params(&self) -> &ParamMap {
        &self.path_params
    }

    /// Query parameters, in the order they are appended.
    pub fn query_params(&self) -> &ParamMap {
        &self.query_params
    }

    /// Request headers, in the order they are sent.
    pub fn headers(&self) -> &ParamMap {
        &self.headers
    }

    /// The URL fragment, if set.
    pub fn fragment(&self) -> Option<&str> {
        self.fragment.as_deref()
    }

    /// The declared request body.
    pub fn body(&self) -> &Body<S> {
        &self.body
    }

    /// Assembles the final URL without sending anything.
    pub fn resolve_url(&self) -> Result<url::Url> {
        crate::url::build_url(
            &self.url,
            &self.path_params,
            &self.query_params,
            self.fragment.as_deref(),
        )
    }

    /// Turns the request back into a builder with the same parts.
    pub fn to_builder(&self) -> RequestBuilder<S>
    where
        S: Clone,
    {
        RequestBuilder {
            url: self.url.clone(),
            method: Some(self.method),
            path_params: self.path_params.clone(),
            query_params: self.query_params.clone(),
            headers: self.headers.clone(),
            fragment: self.fragment.clone(),
            body: self.body.clone(),
        }
    }
}

impl<S> RequestBuilder<S> {
    /// Creates a builder for the URL template `url`.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            method: None,
            path_params: ParamMap::new(),
            query_params: ParamMap::new(),
            headers: ParamMap::new(),
            fragment: None,
            body: Body::Empty,
        }
    }

    /// Sets the value of the `{key}` token.
    pub fn path_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.path_params.insert(key, value);
        self
    }

    /// Replaces every path parameter.
    pub fn path_map(mut self, params: impl Into<ParamMap>) -> Self {
        self.path_params = params.into();
        self
    }

    /// Sets a query parameter.
    pub fn query_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query_params.insert(key, value);
        self
    }

    /// Replaces every query parameter.
    pub fn query_map(mut self, params: impl Into<ParamMap>) -> Self {
        self.query_params = params.into();
        self
    }

    /// Sets a request header.
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name, value);
        self
    }

    /// Replaces every request header.
    pub fn header_map(mut self, headers: impl Into<ParamMap>) -> Self {
        self.headers = headers.into();
        self
    }

    /// Sets the `user-agent` header.
    pub fn user_agent(self, value: impl Into<String>) -> Self {
        self.header(header::USER_AGENT, value)
    }

    /// Sets the `accept` header.
    pub fn accept(self, value: impl Into<String>) -> Self {
        self.header(header::ACCEPT, value)
    }

    /// Sets the `accept-language` header.
    pub fn accept_language(self, value: impl Into<String>) -> Self {
        self.header(header::ACCEPT_LANGUAGE, value)
    }

    /// Sets the `accept-encoding` header.
    pub fn accept_encoding(self, value: impl Into<String>) -> Self {
        self.header(header::ACCEPT_ENCODING, value)
    }

    /// Sets the `authorization` header.
    pub fn authorization(self, value: impl Into<String>) -> Self {
        self.header(header::AUTHORIZATION, value)
    }

    /// Sets the `content-type` header.
    pub fn content_type(self, value: impl Into<String>) -> Self {
        self.header(header::CONTENT_TYPE, value)
    }

    /// Sets the `cookie` header.
    pub fn cookie(self, value: impl Into<String>) -> Self {
        self.header(header::COOKIE, value)
    }

    /// Sets the `referer` header.
    pub fn referer(self, value: impl Into<String>) -> Self {
        self.header(header::REFERER, value)
    }

    /// Sets the `origin` header.
    pub fn origin(self, value: impl Into<String>) -> Self {
        self.header(header::ORIGIN, value)
    }

    /// Sets the request method.
    pub fn method(mut self, method: Method) -> Self {
        self.method = Some(method);
        self
    }

    /// Makes this a `GET` request. A body set on it is never sent.
    pub fn get(self) -> Self {
        self.method(Method::Get)
    }

    /// Makes this a `POST` request.
    pub fn post(self) -> Self {
        self.method(Method::Post)
    }

    /// Makes this a `PUT` request.
    pub fn put(self) -> Self {
        self.method(Method::Put)
    }

    /// Makes this a `PATCH` request.
    pub fn patch(self) -> Self {
        self.method(Method::Patch)
    }

    /// Makes this a `DELETE` request. A body set on it is never sent.
    pub fn delete(self) -> Self {
        self.method(Method::Delete)
    }

    /// Makes this a `HEAD` request. A body set on it is never sent.
    pub fn head(self) -> Self {
        self.method(Method::Head)
    }

    /// Sets the URL fragment. A blank fragment is not appended.
    pub fn fragment(mut self, fragment: impl Into<String>) -> Self {
        self.fragment = Some(fragment.into());
        self
    }

    /// Sets the request body.
    pub fn body(mut self, body: Body<S>) -> Self {
        self.body = body;
        self
    }

    /// Validates the collected parts and freezes them into a [`Request`].
    ///
    /// Fails with [`Error::InvalidRequest`] if the URL is blank or no method is set.
    pub fn build(self) -> Result<Request<S>> {
        if self.url.trim().is_empty() {
            return Err(Error::InvalidRequest("URL must not be blank"));
        }
        let method = self
            .method
            .ok_or(Error::InvalidRequest("HTTP method must be set"))?;
        Ok(Request {
            url: self.url,
            method,
            path_params: self.path_params,
            query_params: self.query_params,
            headers: self.headers,
            fragment: self.fragment,
            body: self.body,
        })
    }
}

impl<S: Clone> Clone for Request<S> {
    fn clone(&self) -> Self {
        Self {
            url: self.url.clone(),
            method: self.method,
            path_params: self.path_params.clone(),
            query_params: self.query_params.clone(),
            headers: self.headers.clone(),
            fragment: self.fragment.clone(),
            body: self.body.clone(),
        }
    }
}

impl<S> fmt::Debug for Request<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Request")
            .field("method", &self.method)
            .field("url", &self.url)
            .field("path_params", &self.path_params)
            .field("query_params", &self.query_params)
            .field("headers", &self.headers)
            .field("fragment", &self.fragment)
            .field("body", &self.body)
            .finish()
    }
}

impl<S> fmt::Debug for RequestBuilder<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RequestBuilder")
            .field("method", &self.method)
            .field("url", &self.url)
            .field("body", &self.body)
            .finish_non_exhaustive()
    }
}

pub(crate) fn header_pairs(headers: &ParamMap) -> Vec<(Cow<'static, str>, Cow<'static, str>)> {
    headers
        .iter()
        .map(|(k, v)| (Cow::Owned(k.to_owned()), Cow::Owned(v.to_owned())))
        .collect()
}
