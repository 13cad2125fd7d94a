//! Declarative HTTP requests over a pluggable HTTP engine.
//!
//! ## Overview
//!
//! Easyquest lets you describe an HTTP call as data: a URL template with `{name}` tokens, path
//! and query parameters, headers, a fragment and a typed body. Sending it resolves the final
//! URL, encodes the body according to its declared kind and decodes the response body into
//! the type you ask for.
//!
//! Text, bytes, streams and files travel as-is. Every other value goes through the client's
//! [`Serializer`], JSON by default, so a custom format only has to implement two methods.
//!
//! ## The `easyquest` crate
//!
//! The `easyquest` crate is a facade without a transport of its own. Sockets, TLS, redirects,
//! proxies and connection pooling are provided by an engine registered through
//! [`easyquest-interface`], such as `easyquest-backend-reqwest`:
//!
//! ```ignore
//! easyquest_backend_reqwest::register();
//! ```
//!
//! ### Threading and `async` Support
//!
//! The "blocking" client enabled by the `blocking` feature can be used in any thread safely.
//! The "async" client enabled by the `async` feature is thread-safe as well, and the `Future`s
//! it returns are `Send`. A [`Request`] is immutable once built and can be sent any number of
//! times, concurrently.
//!
//! ## Usage
//!
//! ```no_run
//! # #[cfg(feature = "blocking")]
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use easyquest::blocking::{Body, Request};
//! use easyquest::{ClientBuilder, Structured};
//!
//! #[derive(serde::Serialize, serde::Deserialize)]
//! struct User {
//!     username: String,
//! }
//!
//! let client = ClientBuilder::default().build_blocking()?;
//! let req = Request::builder("https://example.com/users/{id}")
//!     .path_param("id", "42")
//!     .query_param("findDeleted", "true")
//!     .accept("application/json")
//!     .put()
//!     .body(Body::structured(User { username: "test".into() }))
//!     .build()?;
//! let res = client.send::<Structured<User>>(&req)?.with_successful_status()?;
//! if let Some(user) = res.into_body().into_inner() {
//!     println!("{}", user.username);
//! }
//! # Ok(())
//! # }
//! # #[cfg(not(feature = "blocking"))]
//! # fn main() {}
//! ```
//!
//! For async requests, change `blocking` to `r#async`, build with `build_async().await` and
//! add `.await` to `send`.
//!
//! ## Features
//!
//! - `async`: Enable async support. The registered engine must implement the async interface.
//! - `blocking`: Enable blocking support. The registered engine must implement the blocking
//!   interface.
//!
//! [`easyquest-interface`]: https://docs.rs/easyquest-interface

#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(missing_docs)]
#![cfg_attr(not(any(feature = "async", feature = "blocking")), allow(dead_code))]

mod body;
mod content;
mod dispatch;
mod error;
mod request;
mod response;
mod status;

#[cfg(feature = "async")]
#[cfg_attr(docsrs, doc(cfg(feature = "async")))]
pub mod r#async;
#[cfg(feature = "blocking")]
#[cfg_attr(docsrs, doc(cfg(feature = "blocking")))]
pub mod blocking;
pub mod client;
pub mod header;
pub mod serializer;
pub mod url;

#[cfg(feature = "blocking")]
#[cfg_attr(docsrs, doc(cfg(feature = "blocking")))]
pub use blocking::client::BlockingClient;
pub use body::{Body, StructuredContent};
#[doc(inline)]
pub use client::{BuildClientError, ClientBuilder};
pub use content::{Decoded, Decoder, FromBody, Structured};
pub use error::{BoxError, Error, Result};
#[cfg(feature = "async")]
#[cfg_attr(docsrs, doc(cfg(feature = "async")))]
pub use r#async::client::AsyncClient;
pub use request::{Method, ParamIter, ParamMap, Request, RequestBuilder};
pub use response::Response;
pub use serializer::{JsonSerializer, Serializer};
pub use status::StatusCode;
