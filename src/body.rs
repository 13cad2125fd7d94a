use std::borrow::Cow;
use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

use serde::Serialize;
use serde_json::Value;

type RenderFn = dyn Fn() -> serde_json::Result<Value> + Send + Sync;

/// A request body together with the kind it is declared as.
///
/// The kind decides how the body is encoded when the request is sent: text and bytes go out
/// as-is, streams and files are read while sending, and structured content is rendered by the
/// client's [`crate::Serializer`].
///
/// `S` is the stream source type of the blocking or async flavour, see
/// [`crate::blocking::Body`] and [`crate::r#async::Body`].
pub enum Body<S> {
    /// No content. Nothing is sent.
    Empty,
    /// A text payload, sent as UTF-8.
    Text(Cow<'static, str>),
    /// A raw byte payload.
    Bytes(Cow<'static, [u8]>),
    /// A stream opened anew every time the request is sent.
    Stream(S),
    /// A file streamed from disk. The path must resolve to a readable file when the request is
    /// sent.
    File(PathBuf),
    /// Any serializable value, rendered through the client's serializer.
    Structured(StructuredContent),
}

/// A serializable value held by a [`Body::Structured`].
///
/// Rendering is deferred to send time so the same request can be sent through clients with
/// different serializers.
#[derive(Clone)]
pub struct StructuredContent {
    render: Arc<RenderFn>,
}

impl StructuredContent {
    /// Wraps a serializable value.
    pub fn new<T: Serialize + Send + Sync + 'static>(value: T) -> Self {
        Self {
            render: Arc::new(move || serde_json::to_value(&value)),
        }
    }

    pub(crate) fn to_value(&self) -> serde_json::Result<Value> {
        (self.render)()
    }
}

impl fmt::Debug for StructuredContent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("StructuredContent")
    }
}

impl<S> Body<S> {
    /// A body with no content.
    pub const fn empty() -> Self {
        Self::Empty
    }

    /// A text body.
    pub fn text(text: impl Into<Cow<'static, str>>) -> Self {
        Self::Text(text.into())
    }

    /// A raw byte body.
    pub fn bytes(bytes: impl Into<Cow<'static, [u8]>>) -> Self {
        Self::Bytes(bytes.into())
    }

    /// A body streamed from the file at `path`.
    pub fn file(path: impl Into<PathBuf>) -> Self {
        Self::File(path.into())
    }

    /// A body rendered from `value` by the client's serializer.
    pub fn structured<T: Serialize + Send + Sync + 'static>(value: T) -> Self {
        Self::Structured(StructuredContent::new(value))
    }

    /// A short name of the declared kind, for diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            Body::Empty => "empty",
            Body::Text(_) => "text",
            Body::Bytes(_) => "bytes",
            Body::Stream(_) => "stream",
            Body::File(_) => "file",
            Body::Structured(_) => "structured",
        }
    }
}

impl<S> Default for Body<S> {
    fn default() -> Self {
        Self::Empty
    }
}

impl<S: Clone> Clone for Body<S> {
    fn clone(&self) -> Self {
        match self {
            Body::Empty => Body::Empty,
            Body::Text(text) => Body::Text(text.clone()),
            Body::Bytes(bytes) => Body::Bytes(bytes.clone()),
            Body::Stream(source) => Body::Stream(source.clone()),
            Body::File(path) => Body::File(path.clone()),
            Body::Structured(content) => Body::Structured(content.clone()),
        }
    }
}

impl<S> fmt::Debug for Body<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Body::Empty => f.write_str("Empty"),
            Body::Text(text) => f.debug_tuple("Text").field(text).finish(),
            Body::Bytes(bytes) => f
                .debug_struct("Bytes")
                .field("len", &bytes.len())
                .finish(),
            Body::Stream(_) => f.write_str("Stream"),
            Body::File(path) => f.debug_tuple("File").field(path).finish(),
            Body::Structured(content) => f.debug_tuple("Structured").field(content).finish(),
        }
    }
}
