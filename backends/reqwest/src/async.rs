use std::future::{poll_fn, Future};
use std::io;
use std::pin::{pin, Pin};
use std::task::{ready, Context, Poll};

use easyquest_interface::client::ClientOptions;
use easyquest_interface::r#async::{AsyncClient, AsyncResponse, Request};
use easyquest_interface::{ResponseHead, Result as EngineResult};
use futures::AsyncRead;
use tokio::runtime::Handle;

use crate::client::{ReqwestClient, RuntimeSource};
use crate::error::ReqwestBackendError;
use crate::response::ReqwestResponse;

mod stream;

#[derive(Clone)]
pub struct ReqwestAsyncClient {
    inner: ReqwestClient,
}

impl ReqwestAsyncClient {
    pub fn new(options: ClientOptions, runtime: Option<Handle>) -> EngineResult<Self> {
        let inner = ReqwestClient::new(options, runtime)?;
        Ok(Self { inner })
    }
}

impl AsyncClient for ReqwestAsyncClient {
    type Response = ReqwestAsyncResponse;

    fn describe(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "ReqwestAsyncClient")
    }

    async fn request(&self, req: Request) -> EngineResult<Self::Response> {
        let request_builder = self.inner.build_request(req, stream::read_body)?;

        let (response, handle) = execute_with_runtime_async(&self.inner.runtime, move || async move {
            request_builder.send().await.map_err(|e| {
                tracing::debug!("reqwest transport failure: {e}");
                ReqwestBackendError::Reqwest(e)
            })
        })
        .await?;

        Ok(ReqwestAsyncResponse {
            response: ReqwestResponse::new(response?, self.inner.max_response_buffer_size),
            current_handle: handle,
        })
    }
}

/// Runs `task` on the current tokio runtime, or spawns it on the engine's runtime when the
/// caller runs on another executor. Returns the handle the response body must be polled
/// under.
async fn execute_with_runtime_async<F, Fut, T: Send + 'static>(
    runtime: &RuntimeSource,
    task: F,
) -> io::Result<(T, Handle)>
where
    F: FnOnce() -> Fut + Send + 'static,
    Fut: Future<Output = T> + Send + 'static,
{
    if let Ok(handle) = Handle::try_current() {
        Ok((task().await, handle))
    } else {
        runtime
            .handle()?
            .spawn(async {
                let handle = Handle::current();
                let result = task().await;
                (result, handle)
            })
            .await
            .map_err(io::Error::other)
    }
}

pub struct ReqwestAsyncResponse {
    response: ReqwestResponse,
    current_handle: Handle,
}

impl AsyncResponse for ReqwestAsyncResponse {
    fn describe(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "ReqwestAsyncResponse(status: {})", self.response.status())
    }

    fn head(&self) -> ResponseHead {
        self.response.head()
    }

    async fn read_all(mut self: Pin<&mut Self>) -> EngineResult<Vec<u8>> {
        let Self {
            current_handle,
            response,
        } = &mut *self;
        let mut task = pin!(response.collect_all_bytes());
        poll_fn(|cx| {
            let _enter = current_handle.enter();
            task.as_mut().poll(cx)
        })
        .await
    }
}

impl AsyncRead for ReqwestAsyncResponse {
    fn poll_read(
        mut self: Pin<&mut Self>,
        cx: &mut Context<'_>,
        buf: &mut [u8],
    ) -> Poll<io::Result<usize>> {
        let this = &mut *self;
        loop {
            let written = this.response.write_to(buf)?;
            if written > 0 {
                return Poll::Ready(Ok(written));
            }
            let _enter = this.current_handle.enter();
            let received = ready!(this.response.poll_receive_data_frame_buffered(cx))?;
            if received == 0 {
                break Poll::Ready(Ok(0));
            }
        }
    }
}
