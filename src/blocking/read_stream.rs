use std::fmt;
use std::io;

use easyquest_interface::blocking::BoxedBlockingResponse;

use crate::content::{Decoded, Decoder, FromBody};

/// A response body handed out as an [`std::io::Read`] stream.
///
/// Request it as the response type to read the body incrementally. The connection stays busy
/// until the stream is dropped.
pub struct ReadStream {
    inner: BoxedBlockingResponse,
}

impl ReadStream {
    pub(crate) fn new(inner: BoxedBlockingResponse) -> Self {
        Self { inner }
    }
}

impl io::Read for ReadStream {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.inner.read(buf)
    }
}

impl fmt::Debug for ReadStream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ReadStream(")?;
        self.inner.describe(f)?;
        f.write_str(")")
    }
}

impl FromBody<ReadStream> for ReadStream {
    fn decoder() -> Decoder {
        Decoder::Stream
    }

    fn from_decoded(decoded: Decoded<ReadStream>) -> crate::Result<Self> {
        match decoded {
            Decoded::Stream(stream) => Ok(stream),
            _ => Err(crate::Error::Deserialization(
                "expected stream body".into(),
            )),
        }
    }
}

mod trait_assert {
    trait _AssertMarker: Send + Sync {}
    impl _AssertMarker for super::ReadStream {}
}
