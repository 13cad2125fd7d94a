#![cfg(test)]

use std::{
    collections::BTreeMap,
    convert::Infallible,
    future::Future,
    io,
    net::SocketAddr,
    panic::AssertUnwindSafe,
    sync::{Arc, LazyLock, Mutex, Once, OnceLock},
};

use easyquest::ClientBuilder;
use futures::future::{BoxFuture, FutureExt};
use http_body_util::{combinators::BoxBody, BodyExt, Full};
use hyper::{
    body::{self, Bytes},
    server::conn::http1,
    service::service_fn,
    Request, Response,
};
use hyper_util::rt::TokioIo;
use serde::{Deserialize, Serialize};
use tokio::net::TcpListener;

mod fixtures;

/// Requests sent by blocking clients carry a `blocking: 1` default header.
fn is_blocking(req: &Request<body::Incoming>) -> bool {
    req.headers().get("blocking").map(|v| v.as_bytes()) == Some(b"1")
}

/// What the fixture server saw, sent back as JSON by [`echo`].
#[derive(Debug, Serialize, Deserialize)]
struct Echo {
    method: String,
    path: String,
    query: Option<String>,
    headers: BTreeMap<String, String>,
    body: String,
}

async fn echo(req: Request<body::Incoming>) -> FixtureAssertionResult {
    let (parts, body) = req.into_parts();
    let body = body.collect().await.unwrap().to_bytes();
    let echo = Echo {
        method: parts.method.to_string(),
        path: parts.uri.path().to_owned(),
        query: parts.uri.query().map(str::to_owned),
        headers: parts
            .headers
            .iter()
            .map(|(k, v)| {
                let value = String::from_utf8_lossy(v.as_bytes()).into_owned();
                (k.as_str().to_owned(), value)
            })
            .collect(),
        body: String::from_utf8_lossy(&body).into_owned(),
    };
    let res = Response::builder()
        .header("content-type", "application/json")
        .body(Full::new(Bytes::from(serde_json::to_vec(&echo).unwrap())))
        .unwrap();
    (res.into(), Ok(()))
}

/// Fixture response bodies are boxed so handlers can stream as well as return a full body.
type FixtureBody = BoxBody<Bytes, hyper::Error>;

/// The response a fixture sends, and `Err(request)` when the request did not look the way the
/// test expected.
type FixtureAssertionResult = (FixtureResponse, Result<(), Request<body::Incoming>>);

struct FixtureResponse(Response<FixtureBody>);

impl From<Response<Full<Bytes>>> for FixtureResponse {
    fn from(res: Response<Full<Bytes>>) -> Self {
        Self(res.map(|body| body.map_err(|never| match never {}).boxed()))
    }
}

impl From<Response<FixtureBody>> for FixtureResponse {
    fn from(res: Response<FixtureBody>) -> Self {
        Self(res)
    }
}

type FixtureHandler =
    Arc<dyn Fn(Request<body::Incoming>) -> BoxFuture<'static, FixtureAssertionResult> + Send + Sync>;

struct Fixture {
    handler: FixtureHandler,
    /// The first rejected request or panic, reported when the guard drops.
    failure: Option<String>,
}

/// Fixtures registered by path. Each test uses its own path, so tests run in parallel.
static FIXTURES: Mutex<BTreeMap<String, Fixture>> = Mutex::new(BTreeMap::new());

/// Unregisters its fixture on drop and fails the test if the fixture recorded a failure.
#[must_use]
struct FixtureGuard(String);

impl Drop for FixtureGuard {
    fn drop(&mut self) {
        let fixture = FIXTURES.lock().unwrap().remove(&self.0);
        if let Some(failure) = fixture.and_then(|f| f.failure) {
            if !std::thread::panicking() {
                panic!("fixture {} failed: {failure}", self.0);
            }
        }
    }
}

fn add_hyper_fixture<Fut, Res>(
    path: impl Into<String>,
    handler: impl Fn(Request<body::Incoming>) -> Fut + Send + Sync + 'static,
) -> FixtureGuard
where
    Fut: Future<Output = (Res, Result<(), Request<body::Incoming>>)> + Send + 'static,
    Res: Into<FixtureResponse>,
{
    let path = format!("/{}", path.into().trim_start_matches('/'));
    let handler: FixtureHandler = Arc::new(move |req| {
        let fut = handler(req);
        async move {
            let (res, outcome) = fut.await;
            (res.into(), outcome)
        }
        .boxed()
    });
    let fixture = Fixture {
        handler,
        failure: None,
    };
    FIXTURES.lock().unwrap().insert(path.clone(), fixture);
    FixtureGuard(path)
}

fn record_failure(path: &str, failure: String) {
    if let Some(fixture) = FIXTURES.lock().unwrap().get_mut(path) {
        fixture.failure.get_or_insert(failure);
    }
}

fn plain_response(status: u16, text: &'static str) -> Response<FixtureBody> {
    let mut res = Response::new(Full::new(Bytes::from_static(text.as_bytes())));
    *res.status_mut() = hyper::StatusCode::from_u16(status).unwrap();
    FixtureResponse::from(res).0
}

async fn handle_service(req: Request<body::Incoming>) -> Result<Response<FixtureBody>, Infallible> {
    let path = req.uri().path().to_owned();
    let handler = FIXTURES
        .lock()
        .unwrap()
        .get(&path)
        .map(|f| Arc::clone(&f.handler));
    let Some(handler) = handler else {
        return Ok(plain_response(404, "no fixture registered"));
    };

    match AssertUnwindSafe(handler(req)).catch_unwind().await {
        Ok((res, Ok(()))) => Ok(res.0),
        Ok((res, Err(req))) => {
            record_failure(&path, format!("unexpected request {req:?}"));
            Ok(res.0)
        }
        Err(panic) => {
            let message = panic
                .downcast_ref::<&str>()
                .map(|s| s.to_string())
                .or_else(|| panic.downcast_ref::<String>().cloned())
                .unwrap_or_else(|| "non-string panic payload".into());
            record_failure(&path, format!("handler panicked: {message}"));
            Ok(plain_response(500, "fixture panicked"))
        }
    }
}

async fn setup_hyper_impl() -> Result<String, io::Error> {
    let addr = SocketAddr::from(([127, 0, 0, 1], 0));

    let listener = TcpListener::bind(addr).await?;
    let port = listener.local_addr()?.port();

    tokio::spawn(async move {
        while let Ok((stream, _)) = listener.accept().await {
            tokio::spawn(async move {
                let conn = http1::Builder::new()
                    .serve_connection(TokioIo::new(stream), service_fn(handle_service));
                if let Err(err) = conn.await {
                    eprintln!("fixture connection closed with error: {err:?}");
                }
            });
        }
    });

    Ok(format!("http://127.0.0.1:{port}"))
}

static TOKIO_RT: LazyLock<tokio::runtime::Runtime> = LazyLock::new(|| {
    tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .unwrap()
});

static BASE_URL: OnceLock<String> = OnceLock::new();

/// The absolute URL of `path` on the fixture server. Only valid after `init_builder`.
fn endpoint(path: &str) -> String {
    let base = BASE_URL.get().expect("fixture server not started");
    format!("{base}/{}", path.trim_start_matches('/'))
}

async fn init_builder() -> io::Result<ClientBuilder> {
    use tokio::sync::OnceCell;

    static BACKEND_INIT: Once = Once::new();
    BACKEND_INIT.call_once(init_backend);

    static HYPER_SERVICE_INIT: OnceCell<io::Result<String>> = OnceCell::const_new();
    match HYPER_SERVICE_INIT.get_or_init(setup_hyper_impl).await {
        Ok(url) => {
            BASE_URL.get_or_init(|| url.clone());
            Ok(ClientBuilder::default())
        }
        Err(err) => Err(io::Error::new(err.kind(), err.to_string())),
    }
}

fn init_builder_blocking() -> io::Result<ClientBuilder> {
    TOKIO_RT.block_on(async {
        init_builder()
            .await
            .map(|cb| cb.with_header("blocking", "1"))
    })
}

macro_rules! declare_backends {
    ($(($feature:expr, $pkg:ident)),* $(,)*) => {
        cfg_if::cfg_if! {
            if #[cfg(any())] {
            } $(
                else if #[cfg(feature = $feature)] {
                    use $pkg as backend;
                }
            )* else {
                pub mod backend {
                    pub fn register() { }
                }
            }
        }

        #[allow(non_upper_case_globals)]
        let backend_feature_count = 0 $(+ cfg!(feature = $feature) as u32)*;
        match backend_feature_count {
            0 => panic!("No backend feature enabled."),
            1 => backend::register(),
            _ => panic!("Multiple backend features enabled."),
        }
    };
}

fn init_backend() {
    declare_backends!(("reqwest", easyquest_backend_reqwest));
}
