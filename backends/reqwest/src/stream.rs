use std::io::{self, Read};

use bytes::BytesMut;

pub(crate) const READ_BUFFER_SIZE: usize = 16 * 1024;

/// Streams a blocking reader as a request body. Each read runs on the blocking thread pool of
/// the runtime driving the request.
pub(crate) fn read_body<R>(reader: R) -> reqwest::Body
where
    R: Read + Send + Sync + 'static,
{
    let chunks = futures::stream::try_unfold(reader, |mut reader| async move {
        let (chunk, reader) = tokio::task::spawn_blocking(move || {
            let mut buf = BytesMut::zeroed(READ_BUFFER_SIZE);
            let n = reader.read(&mut buf)?;
            buf.truncate(n);
            Ok::<_, io::Error>((buf.freeze(), reader))
        })
        .await
        .map_err(io::Error::other)??;
        Ok::<_, io::Error>(if chunk.is_empty() {
            None
        } else {
            Some((chunk, reader))
        })
    });
    reqwest::Body::wrap_stream(chunks)
}
