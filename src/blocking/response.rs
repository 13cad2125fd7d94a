use std::io;

use easyquest_interface::blocking::{AnyBlockingResponse, BoxedBlockingResponse};

use super::ReadStream;
use crate::content::{self, Decoded, Decoder, ResponseFile};
use crate::serializer::Serializer;
use crate::{Error, Response, Result};

/// Reads the body of `res` with `decoder`, blocking until it is complete unless the decoder
/// streams.
pub(super) fn decode(
    mut res: BoxedBlockingResponse,
    decoder: Decoder,
    serializer: &dyn Serializer,
) -> Result<Response<Decoded<ReadStream>>> {
    let head = res.head();
    let body = match decoder {
        Decoder::Discard => Decoded::Nothing,
        Decoder::Text => Decoded::Text(read_text(&mut *res)?),
        Decoder::Bytes => Decoded::Bytes(res.read_all()?),
        Decoder::Stream => Decoded::Stream(ReadStream::new(res)),
        Decoder::File(path) => {
            let mut file = ResponseFile::create(path.as_deref())?;
            io::copy(&mut res, file.as_file_mut()).map_err(Error::http_io)?;
            Decoded::File(file.keep()?)
        }
        Decoder::Structured => {
            let text = read_text(&mut *res)?;
            Decoded::Structured(content::decode_structured(&text, serializer)?)
        }
    };
    Ok(Response::new(head, body))
}

fn read_text(res: &mut dyn AnyBlockingResponse) -> Result<String> {
    let bytes = res.read_all()?;
    Ok(String::from_utf8(bytes)
        .unwrap_or_else(|e| String::from_utf8_lossy(e.as_bytes()).into_owned()))
}
