//! Turns a [`Request`] into the resolved request an engine sends.

use std::io;

use easyquest_interface::{Method, Request as RequestImpl};

use crate::content::{self, Decoder};
use crate::request::{header_pairs, Request};
use crate::serializer::Serializer;
use crate::Result;

/// Whether the method carries a request body.
///
/// `PATCH` is forwarded as its own method token; engines never fold it into `POST`.
pub(crate) fn sends_body(method: Method) -> bool {
    matches!(method, Method::Post | Method::Put | Method::Patch)
}

/// Resolves the URL, attaches headers in order and encodes the body if the method sends one.
///
/// Nothing is opened or serialized for methods without a body.
pub(crate) fn prepare<S, B>(
    req: &Request<S>,
    serializer: &dyn Serializer,
    decoder: &Decoder,
    open_stream: impl FnOnce(&S) -> io::Result<B>,
) -> Result<RequestImpl<B>> {
    let url = req.resolve_url()?;
    tracing::debug!(method = %req.method(), url = %url, "dispatching request");

    let body = if sends_body(req.method()) {
        content::encode_body(req.body(), serializer, open_stream)?
    } else {
        None
    };
    tracing::trace!(
        encoder = body.as_ref().map_or("none", |b| b.kind()),
        declared = req.body().kind(),
        ?decoder,
        "negotiated content"
    );

    Ok(RequestImpl {
        method: req.method(),
        uri: url.into(),
        headers: header_pairs(req.headers()),
        body,
    })
}
