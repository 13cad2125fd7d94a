use std::fmt;
use std::io;
use std::pin::Pin;
use std::task::{Context, Poll};

use easyquest_interface::r#async::futures_io;
use easyquest_interface::r#async::BoxedAsyncResponse;

use crate::content::{Decoded, Decoder, FromBody};

/// A response body handed out as a [`futures_io::AsyncRead`] stream.
pub struct AsyncReadStream {
    inner: BoxedAsyncResponse,
}

impl AsyncReadStream {
    pub(crate) fn new(inner: BoxedAsyncResponse) -> Self {
        Self { inner }
    }
}

impl futures_io::AsyncRead for AsyncReadStream {
    fn poll_read(
        mut self: Pin<&mut Self>,
        cx: &mut Context<'_>,
        buf: &mut [u8],
    ) -> Poll<io::Result<usize>> {
        futures_io::AsyncRead::poll_read(self.inner.as_mut(), cx, buf)
    }
}

impl fmt::Debug for AsyncReadStream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AsyncReadStream(")?;
        self.inner.describe(f)?;
        f.write_str(")")
    }
}

impl FromBody<AsyncReadStream> for AsyncReadStream {
    fn decoder() -> Decoder {
        Decoder::Stream
    }

    fn from_decoded(decoded: Decoded<AsyncReadStream>) -> crate::Result<Self> {
        match decoded {
            Decoded::Stream(stream) => Ok(stream),
            _ => Err(crate::Error::Deserialization(
                "expected stream body".into(),
            )),
        }
    }
}

mod trait_assert {
    trait _AssertMarker: Send + Sync + Unpin {}
    impl _AssertMarker for super::AsyncReadStream {}
}
