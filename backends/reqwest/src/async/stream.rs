use std::io;

use bytes::BytesMut;
use easyquest_interface::r#async::BoxedStream;
use futures::AsyncReadExt;

use crate::stream::READ_BUFFER_SIZE;

/// Streams an async reader as a request body, polled by the runtime driving the request.
pub(super) fn read_body(stream: BoxedStream) -> reqwest::Body {
    let chunks = futures::stream::try_unfold(stream, |mut stream| async move {
        let mut buf = BytesMut::zeroed(READ_BUFFER_SIZE);
        let n = stream.read(&mut buf).await?;
        buf.truncate(n);
        Ok::<_, io::Error>((n > 0).then(|| (buf.freeze(), stream)))
    });
    reqwest::Body::wrap_stream(chunks)
}
