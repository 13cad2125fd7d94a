use std::{
    future::poll_fn,
    io,
    pin::Pin,
    task::{ready, Context, Poll},
};

use bytes::Bytes;
use easyquest_interface::{ResponseHead, Result as EngineResult};
use http::response::Parts;
use http_body::Body as _;

use crate::error::ReqwestBackendError;

fn body_error(e: io::Error) -> easyquest_interface::Error {
    if e.kind() == io::ErrorKind::TimedOut {
        easyquest_interface::Error::RequestTimeout
    } else {
        easyquest_interface::Error::Io(e)
    }
}

#[derive(Debug)]
pub(crate) struct ReqwestResponse {
    parts: Parts,
    body: Pin<Box<reqwest::Body>>,
    buffer: Bytes,
    max_response_buffer_size: Option<u64>,
}

impl ReqwestResponse {
    pub fn new(response: reqwest::Response, max_response_buffer_size: Option<u64>) -> Self {
        let http_response: http::Response<reqwest::Body> = response.into();
        let (parts, body) = http_response.into_parts();

        Self {
            parts,
            body: Box::pin(body),
            buffer: Bytes::new(),
            max_response_buffer_size,
        }
    }

    pub fn status(&self) -> u16 {
        self.parts.status.as_u16()
    }

    pub fn head(&self) -> ResponseHead {
        let headers = self
            .parts
            .headers
            .iter()
            .map(|(k, v)| {
                let value = String::from_utf8_lossy(v.as_bytes()).into_owned();
                (k.as_str().to_owned(), value)
            })
            .collect();
        ResponseHead {
            status: self.status(),
            content_length: self.body.size_hint().exact(),
            headers,
        }
    }

    pub async fn collect_all_bytes(&mut self) -> EngineResult<Vec<u8>> {
        let mut bufs = vec![];
        let mut collected_size = 0;
        loop {
            let Some(frame) = self.receive_data_frame().await.map_err(body_error)? else {
                break;
            };
            if self
                .max_response_buffer_size
                .is_some_and(|max| (collected_size + frame.len()) as u64 > max)
            {
                return Err(ReqwestBackendError::ResponseTooLarge.into());
            }
            collected_size += frame.len();
            bufs.push(frame);
        }
        Ok(bufs.concat())
    }

    pub fn write_to(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let to_write = buf.len().min(self.buffer.len());
        if to_write > 0 {
            let src = self.buffer.split_to(to_write);
            buf[..to_write].copy_from_slice(&src);
            return Ok(to_write);
        }
        Ok(0)
    }

    fn poll_receive_data_frame(&mut self, cx: &mut Context<'_>) -> Poll<io::Result<Option<Bytes>>> {
        // Skip trailers and empty data frames; only the end of the body yields `None`.
        loop {
            match ready!(self.body.as_mut().poll_frame(cx)) {
                None => return Poll::Ready(Ok(None)),
                Some(Err(e)) if e.is_timeout() => {
                    return Poll::Ready(Err(io::Error::new(io::ErrorKind::TimedOut, e)))
                }
                Some(Err(e)) => return Poll::Ready(Err(io::Error::other(e))),
                Some(Ok(frame)) => match frame.into_data() {
                    Ok(data) if !data.is_empty() => return Poll::Ready(Ok(Some(data))),
                    _ => continue,
                },
            }
        }
    }

    async fn receive_data_frame(&mut self) -> io::Result<Option<Bytes>> {
        poll_fn(|cx| self.poll_receive_data_frame(cx)).await
    }

    #[cfg(feature = "async")]
    pub fn poll_receive_data_frame_buffered(
        &mut self,
        cx: &mut Context<'_>,
    ) -> Poll<io::Result<usize>> {
        let buffer = ready!(self.poll_receive_data_frame(cx))?.unwrap_or_default();
        let len = buffer.len();
        self.buffer = buffer;
        Poll::Ready(Ok(len))
    }

    #[cfg(feature = "blocking")]
    pub async fn receive_data_frame_buffered(&mut self) -> io::Result<usize> {
        let buffer = self.receive_data_frame().await?.unwrap_or_default();
        let len = buffer.len();
        self.buffer = buffer;
        Ok(len)
    }
}
