use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use easyquest_interface::{blocking::AnyBlockingClient, register::BACKEND};

use super::{response, ReadStream, Request};
use crate::client::{BuildClientError, BuildClientResult, ClientBuilder};
use crate::content::{Decoded, Decoder, FromBody};
use crate::serializer::Serializer;
use crate::{dispatch, Response, Result};

/// A blocking HTTP client to send [`Request`]s with.
///
/// The current thread issuing an operation will be blocked until it is completed.
///
/// Depending on the engine, it might hold a connection pool, a thread pool or other kind of
/// resources internally, so it is advised that you create one and reuse it.
///
/// # Thread safety
///
/// The client is cheap to clone and can be shared between threads. Requests can be sent from
/// multiple threads concurrently; the serializer is shared by all of them.
#[derive(Clone)]
pub struct BlockingClient {
    client: Arc<dyn AnyBlockingClient>,
    serializer: Arc<dyn Serializer>,
}

impl ClientBuilder {
    /// Build a new blocking client with the given options.
    pub fn build_blocking(self) -> BuildClientResult<BlockingClient> {
        let (options, serializer) = self.into_parts();
        Ok(BlockingClient {
            client: BACKEND
                .get()
                .ok_or(BuildClientError::NoBackend)?
                .create_blocking_client(options)?,
            serializer,
        })
    }
}

impl BlockingClient {
    /// Sends a request and decodes the response body into `T`, blocking until the body is
    /// decoded. With [`ReadStream`] as `T`, returns once the headers are received.
    ///
    /// `GET`, `HEAD` and `DELETE` requests never send a body.
    pub fn send<T: FromBody<ReadStream>>(&self, req: &Request) -> Result<Response<T>> {
        self.send_with(req, T::decoder())?
            .map(T::from_decoded)
            .transpose()
    }

    /// Sends a request and reads the response body as text.
    pub fn send_text(&self, req: &Request) -> Result<Response<String>> {
        self.send(req)
    }

    /// Sends a request and writes the response body to `path`, creating or truncating it.
    pub fn send_to_file(&self, req: &Request, path: impl AsRef<Path>) -> Result<Response<PathBuf>> {
        self.send_with(req, Decoder::File(Some(path.as_ref().to_owned())))?
            .map(PathBuf::from_decoded)
            .transpose()
    }

    /// The serializer used for structured bodies.
    pub fn serializer(&self) -> &dyn Serializer {
        &*self.serializer
    }

    fn send_with(
        &self,
        req: &Request,
        decoder: Decoder,
    ) -> Result<Response<Decoded<ReadStream>>> {
        let prepared = dispatch::prepare(req, &*self.serializer, &decoder, |source| {
            source.open()
        })?;
        let res = self.client.request(prepared).inspect_err(|e| {
            tracing::debug!(method = %req.method(), "HTTP call failed: {e}");
        })?;
        response::decode(res, decoder, &*self.serializer)
    }
}

impl fmt::Debug for BlockingClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.client.describe(f)
    }
}
