use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use easyquest_interface::{r#async::AnyAsyncClient, register::BACKEND};

use super::{response, AsyncReadStream, Request};
use crate::client::{BuildClientError, BuildClientResult, ClientBuilder};
use crate::content::{Decoded, Decoder, FromBody};
use crate::serializer::Serializer;
use crate::{dispatch, Response, Result};

/// An async HTTP client to send [`Request`]s with.
///
/// The client is cheap to clone and can be shared between tasks. The futures it returns are
/// `Send`.
#[derive(Clone)]
pub struct AsyncClient {
    client: Arc<dyn AnyAsyncClient>,
    serializer: Arc<dyn Serializer>,
}

impl ClientBuilder {
    /// Build a new async client with the given options.
    pub async fn build_async(self) -> BuildClientResult<AsyncClient> {
        let (options, serializer) = self.into_parts();
        Ok(AsyncClient {
            client: BACKEND
                .get()
                .ok_or(BuildClientError::NoBackend)?
                .create_async_client(options)
                .await?,
            serializer,
        })
    }
}

impl AsyncClient {
    /// Sends a request and decodes the response body into `T`. With [`AsyncReadStream`] as
    /// `T`, resolves once the headers are received.
    ///
    /// Fails exactly as [`crate::BlockingClient::send`] would. `GET`, `HEAD` and `DELETE`
    /// requests never send a body.
    pub async fn send<T: FromBody<AsyncReadStream>>(&self, req: &Request) -> Result<Response<T>> {
        self.send_with(req, T::decoder())
            .await?
            .map(T::from_decoded)
            .transpose()
    }

    /// Sends a request and reads the response body as text.
    pub async fn send_text(&self, req: &Request) -> Result<Response<String>> {
        self.send(req).await
    }

    /// Sends a request and writes the response body to `path`, creating or truncating it.
    pub async fn send_to_file(
        &self,
        req: &Request,
        path: impl AsRef<Path>,
    ) -> Result<Response<PathBuf>> {
        self.send_with(req, Decoder::File(Some(path.as_ref().to_owned())))
            .await?
            .map(PathBuf::from_decoded)
            .transpose()
    }

    /// The serializer used for structured bodies.
    pub fn serializer(&self) -> &dyn Serializer {
        &*self.serializer
    }

    async fn send_with(
        &self,
        req: &Request,
        decoder: Decoder,
    ) -> Result<Response<Decoded<AsyncReadStream>>> {
        let prepared = dispatch::prepare(req, &*self.serializer, &decoder, |source| {
            source.open()
        })?;
        let res = self.client.request(prepared).await.inspect_err(|e| {
            tracing::debug!(method = %req.method(), "HTTP call failed: {e}");
        })?;
        response::decode(res, decoder, &*self.serializer).await
    }
}

impl fmt::Debug for AsyncClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.client.describe(f)
    }
}
