//! Wire-level request bodies.

use std::borrow::Cow;
use std::fmt;
use std::fs::File;

/// A stream with an optional known length.
pub struct StreamReader<S> {
    /// The stream to read the payload from.
    pub stream: S,
    /// Total length in bytes, if known upfront.
    pub content_length: Option<u64>,
}

/// An encoded request body.
///
/// Every declared body kind of the facade collapses into one of these shapes.
pub enum Body<S> {
    /// An in-memory payload.
    Bytes {
        /// The payload.
        content: Cow<'static, [u8]>,
    },
    /// A payload pulled from a reader while the request is being sent.
    Stream(StreamReader<S>),
    /// A payload read from an already opened file.
    ///
    /// The handle is released once the engine has finished sending or the request fails.
    File {
        /// The opened file.
        file: File,
        /// Length of the file at open time.
        content_length: u64,
    },
}

impl<S> Body<S> {
    /// A short name of the body shape, for diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            Body::Bytes { .. } => "bytes",
            Body::Stream(_) => "stream",
            Body::File { .. } => "file",
        }
    }

    /// Length of the payload in bytes, when known before sending.
    pub fn content_length(&self) -> Option<u64> {
        match self {
            Body::Bytes { content } => Some(content.len() as u64),
            Body::Stream(reader) => reader.content_length,
            Body::File { content_length, .. } => Some(*content_length),
        }
    }
}

impl<S> fmt::Debug for Body<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Body")
            .field("kind", &self.kind())
            .field("content_length", &self.content_length())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_shows_shape_and_length() {
        let body: Body<()> = Body::Bytes {
            content: Cow::Borrowed(b"abc"),
        };
        assert_eq!(
            format!("{body:?}"),
            r#"Body { kind: "bytes", content_length: Some(3) }"#
        );
        let body = Body::Stream(StreamReader {
            stream: (),
            content_length: None,
        });
        assert_eq!(
            format!("{body:?}"),
            r#"Body { kind: "stream", content_length: None }"#
        );
    }
}
