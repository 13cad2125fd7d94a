use std::io;
use std::sync::{Arc, OnceLock};

use easyquest_interface::client::{
    BasicCredentials, ClientOptions, HttpVersion, ProxyPolicy, RedirectPolicy,
};
use easyquest_interface::Result as EngineResult;
use http::{HeaderMap, HeaderName, HeaderValue};
use reqwest::redirect::{Attempt, Policy};
use reqwest::Client;
use tokio::runtime::{Handle, Runtime};

use crate::error::{ReqwestBackendError, Result};

const MAX_REDIRECTS: usize = 10;

#[derive(Clone)]
pub struct ReqwestClient {
    pub(crate) client: Client,
    pub(crate) max_response_buffer_size: Option<u64>,
    pub(crate) basic_auth: Option<BasicCredentials>,
    pub(crate) runtime: RuntimeSource,
}

/// Where requests run when the calling thread is not inside a tokio runtime.
#[derive(Clone)]
pub(crate) enum RuntimeSource {
    /// A runtime handle given at registration.
    Handle(Handle),
    /// A runtime created on first use and shared by the clones of one client.
    Managed(Arc<OnceLock<Runtime>>),
}

impl ReqwestClient {
    pub fn new(options: ClientOptions, runtime: Option<Handle>) -> EngineResult<Self> {
        let client = build_reqwest_client(&options).inspect_err(|e| {
            tracing::debug!("failed to build reqwest client: {e}");
        })?;
        tracing::debug!(
            redirect = ?options.redirect_policy,
            proxy = ?options.proxy,
            http_version = ?options.http_version,
            cookies = options.use_cookies,
            "built reqwest client"
        );

        Ok(Self {
            client,
            max_response_buffer_size: options.max_response_buffer_size,
            basic_auth: options.basic_auth,
            runtime: match runtime {
                Some(handle) => RuntimeSource::Handle(handle),
                None => RuntimeSource::Managed(Arc::new(OnceLock::new())),
            },
        })
    }
}

impl RuntimeSource {
    pub(crate) fn handle(&self) -> io::Result<Handle> {
        match self {
            RuntimeSource::Handle(handle) => Ok(handle.clone()),
            RuntimeSource::Managed(cell) => Ok(managed_runtime(cell)?.handle().clone()),
        }
    }
}

fn managed_runtime(cell: &OnceLock<Runtime>) -> io::Result<&Runtime> {
    if let Some(runtime) = cell.get() {
        return Ok(runtime);
    }
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .thread_name("easyquest-reqwest")
        .worker_threads(1)
        .enable_all()
        .build()?;
    // Another thread may have won the race, in which case ours is dropped.
    Ok(cell.get_or_init(|| runtime))
}

pub fn build_reqwest_client(options: &ClientOptions) -> Result<Client> {
    let mut builder = Client::builder();

    if let Some(user_agent) = &options.user_agent {
        builder = builder.user_agent(user_agent);
    }
    let default_headers: Result<HeaderMap> = options
        .default_headers
        .iter()
        .map(|(k, v)| {
            Ok::<_, ReqwestBackendError>((
                HeaderName::from_bytes(k.as_bytes())
                    .map_err(|_| ReqwestBackendError::InvalidHeaderName(k.into()))?,
                HeaderValue::from_str(v)
                    .map_err(|_| ReqwestBackendError::InvalidHeaderValue(k.into()))?,
            ))
        })
        .collect();

    builder = match &options.proxy {
        ProxyPolicy::System => builder,
        ProxyPolicy::NoProxy => builder.no_proxy(),
        ProxyPolicy::All(url) => builder.proxy(
            reqwest::Proxy::all(url)
                .map_err(|e| ReqwestBackendError::InvalidProxy(url.clone(), e))?,
        ),
    };
    builder = builder
        .cookie_store(options.use_cookies)
        .redirect(redirect_policy(options.redirect_policy))
        .danger_accept_invalid_certs(options.ignore_certificate_errors);
    for pem in &options.root_certificates {
        let cert =
            reqwest::Certificate::from_pem(pem).map_err(ReqwestBackendError::InvalidCertificate)?;
        builder = builder.add_root_certificate(cert);
    }
    builder = match options.http_version {
        HttpVersion::Auto => builder,
        HttpVersion::Http1Only => builder.http1_only(),
        HttpVersion::Http2 => builder.http2_prior_knowledge(),
    };

    if let Some(timeout) = options.connect_timeout {
        builder = builder.connect_timeout(timeout);
    }
    if let Some(timeout) = options.request_timeout {
        builder = builder.timeout(timeout);
    }

    builder
        .default_headers(default_headers?)
        .build()
        .map_err(ReqwestBackendError::Reqwest)
}

fn redirect_policy(policy: RedirectPolicy) -> Policy {
    match policy {
        RedirectPolicy::Never => Policy::none(),
        RedirectPolicy::Always => Policy::limited(MAX_REDIRECTS),
        RedirectPolicy::Normal => Policy::custom(follow_without_downgrade),
    }
}

fn follow_without_downgrade(attempt: Attempt) -> reqwest::redirect::Action {
    if attempt.previous().len() > MAX_REDIRECTS {
        return attempt.error("too many redirects");
    }
    let downgrade = attempt
        .previous()
        .last()
        .is_some_and(|prev| prev.scheme() == "https")
        && attempt.url().scheme() == "http";
    if downgrade {
        attempt.stop()
    } else {
        attempt.follow()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_with_every_option() {
        let options = ClientOptions {
            user_agent: Some("easyquest-test".into()),
            default_headers: vec![("x-api-key".into(), "k".into())],
            proxy: ProxyPolicy::NoProxy,
            use_cookies: false,
            redirect_policy: RedirectPolicy::Never,
            max_response_buffer_size: Some(1024),
            connect_timeout: Some(std::time::Duration::from_secs(1)),
            request_timeout: Some(std::time::Duration::from_secs(5)),
            ignore_certificate_errors: true,
            root_certificates: vec![],
            basic_auth: None,
            http_version: HttpVersion::Http1Only,
        };
        assert!(build_reqwest_client(&options).is_ok());
    }

    #[test]
    fn test_invalid_default_header() {
        let options = ClientOptions {
            default_headers: vec![("bad header".into(), "v".into())],
            ..Default::default()
        };
        assert!(matches!(
            build_reqwest_client(&options),
            Err(ReqwestBackendError::InvalidHeaderName(_))
        ));
    }
}
