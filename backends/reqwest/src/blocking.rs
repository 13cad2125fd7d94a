use std::future::Future;
use std::io::{self, Read};

use easyquest_interface::blocking::{BlockingClient, BlockingResponse, Request};
use easyquest_interface::client::ClientOptions;
use easyquest_interface::{ResponseHead, Result as EngineResult};
use tokio::runtime::Handle;

use crate::client::{ReqwestClient, RuntimeSource};
use crate::error::ReqwestBackendError;
use crate::response::ReqwestResponse;

#[derive(Clone)]
pub struct ReqwestBlockingClient {
    inner: ReqwestClient,
}

impl ReqwestBlockingClient {
    pub fn new(options: ClientOptions, runtime: Option<Handle>) -> EngineResult<Self> {
        let inner = ReqwestClient::new(options, runtime)?;
        Ok(Self { inner })
    }
}

impl BlockingClient for ReqwestBlockingClient {
    type Response = ReqwestBlockingResponse;

    fn describe(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "ReqwestBlockingClient")
    }

    fn request(&self, req: Request) -> EngineResult<Self::Response> {
        let request_builder = self
            .inner
            .build_request(req, crate::stream::read_body)?;
        let response = execute_with_runtime(&self.inner.runtime, || async {
            request_builder.send().await.map_err(|e| {
                tracing::debug!("reqwest transport failure: {e}");
                ReqwestBackendError::Reqwest(e)
            })
        })??;

        Ok(ReqwestBlockingResponse {
            response: ReqwestResponse::new(response, self.inner.max_response_buffer_size),
            runtime: self.inner.runtime.clone(),
        })
    }
}

pub struct ReqwestBlockingResponse {
    response: ReqwestResponse,
    runtime: RuntimeSource,
}

/// Drives `task` to completion from synchronous code.
///
/// Inside a tokio runtime the current worker is handed over with `block_in_place`, which
/// requires the multi-threaded flavor.
fn execute_with_runtime<F, Fut, T>(runtime: &RuntimeSource, task: F) -> io::Result<T>
where
    F: FnOnce() -> Fut,
    Fut: Future<Output = T>,
{
    if let Ok(current) = Handle::try_current() {
        Ok(tokio::task::block_in_place(|| current.block_on(task())))
    } else {
        Ok(runtime.handle()?.block_on(task()))
    }
}

impl BlockingResponse for ReqwestBlockingResponse {
    fn describe(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "ReqwestBlockingResponse(status: {})", self.response.status())
    }

    fn head(&self) -> ResponseHead {
        self.response.head()
    }

    fn read_all(&mut self) -> EngineResult<Vec<u8>> {
        execute_with_runtime(&self.runtime, || self.response.collect_all_bytes())?
    }
}

impl Read for ReqwestBlockingResponse {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        loop {
            let written = self.response.write_to(buf)?;
            if written > 0 {
                break Ok(written);
            }
            let received = execute_with_runtime(&self.runtime, || {
                self.response.receive_data_frame_buffered()
            })??;
            if received == 0 {
                break Ok(0);
            }
        }
    }
}
