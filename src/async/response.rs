use std::pin::Pin;

use easyquest_interface::r#async::{AnyAsyncResponse, BoxedAsyncResponse};
use futures_util::io::AllowStdIo;

use super::AsyncReadStream;
use crate::content::{self, Decoded, Decoder, ResponseFile};
use crate::serializer::Serializer;
use crate::{Error, Response, Result};

/// Reads the body of `res` with `decoder`. Resolves once the body is decoded, or right away
/// when the decoder streams.
pub(super) async fn decode(
    mut res: BoxedAsyncResponse,
    decoder: Decoder,
    serializer: &dyn Serializer,
) -> Result<Response<Decoded<AsyncReadStream>>> {
    let head = res.head();
    let body = match decoder {
        Decoder::Discard => Decoded::Nothing,
        Decoder::Text => Decoded::Text(read_text(res.as_mut()).await?),
        Decoder::Bytes => Decoded::Bytes(res.as_mut().read_all().await?),
        Decoder::Stream => Decoded::Stream(AsyncReadStream::new(res)),
        Decoder::File(path) => {
            let mut file = ResponseFile::create(path.as_deref())?;
            // The file is written synchronously between polls of the response body.
            futures_util::io::copy(&mut res, &mut AllowStdIo::new(file.as_file_mut()))
                .await
                .map_err(Error::http_io)?;
            Decoded::File(file.keep()?)
        }
        Decoder::Structured => {
            let text = read_text(res.as_mut()).await?;
            Decoded::Structured(content::decode_structured(&text, serializer)?)
        }
    };
    Ok(Response::new(head, body))
}

async fn read_text(res: Pin<&mut dyn AnyAsyncResponse>) -> Result<String> {
    let bytes = res.read_all().await?;
    Ok(String::from_utf8(bytes)
        .unwrap_or_else(|e| String::from_utf8_lossy(e.as_bytes()).into_owned()))
}
