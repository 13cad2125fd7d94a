use std::borrow::Cow;

use easyquest_interface::{Body, Method, Request, StreamReader};
use http::header::{AUTHORIZATION, CONTENT_LENGTH};
use http::{HeaderMap, HeaderName, HeaderValue};
use reqwest::RequestBuilder;
use url::Url;

use crate::client::ReqwestClient;
use crate::error::{ReqwestBackendError, Result};

pub fn convert_method(method: Method) -> reqwest::Method {
    match method {
        Method::Get => reqwest::Method::GET,
        Method::Post => reqwest::Method::POST,
        Method::Put => reqwest::Method::PUT,
        Method::Delete => reqwest::Method::DELETE,
        Method::Head => reqwest::Method::HEAD,
        Method::Patch => reqwest::Method::PATCH,
    }
}

fn convert_header_name(s: Cow<'static, str>) -> Result<HeaderName> {
    HeaderName::from_bytes(s.as_bytes())
        .map_err(|_| ReqwestBackendError::InvalidHeaderName(s.into_owned()))
}

fn convert_header_value(k: &str, v: &str) -> Result<HeaderValue> {
    HeaderValue::from_str(v).map_err(|_| ReqwestBackendError::InvalidHeaderValue(k.into()))
}

fn set_content_length(headers: &mut HeaderMap, content_length: Option<u64>) {
    if let Some(len) = content_length {
        headers
            .entry(CONTENT_LENGTH)
            .or_insert_with(|| HeaderValue::from(len));
    }
}

impl ReqwestClient {
    /// Translates a resolved request. Later headers replace earlier ones of the same name.
    pub(crate) fn build_request<S>(
        &self,
        req: Request<S>,
        transform_stream: impl FnOnce(S) -> reqwest::Body,
    ) -> Result<RequestBuilder> {
        let url = Url::parse(&req.uri).map_err(|_| ReqwestBackendError::InvalidUrl(req.uri))?;
        let mut request_builder = self.client.request(convert_method(req.method), url);

        let mut headers = HeaderMap::with_capacity(req.headers.len());
        for (key, value) in req.headers {
            let value = convert_header_value(&key, &value)?;
            headers.insert(convert_header_name(key)?, value);
        }

        if let Some(credentials) = &self.basic_auth {
            if !headers.contains_key(AUTHORIZATION) {
                request_builder = request_builder
                    .basic_auth(&credentials.username, credentials.password.as_deref());
            }
        }

        match req.body {
            None => {}
            Some(Body::Bytes {
                content: Cow::Borrowed(content),
            }) => {
                request_builder = request_builder.body(content);
            }
            Some(Body::Bytes {
                content: Cow::Owned(content),
            }) => {
                request_builder = request_builder.body(content);
            }
            Some(Body::Stream(StreamReader {
                stream,
                content_length,
            })) => {
                set_content_length(&mut headers, content_length);
                request_builder = request_builder.body(transform_stream(stream));
            }
            Some(Body::File {
                file,
                content_length,
            }) => {
                set_content_length(&mut headers, Some(content_length));
                request_builder = request_builder.body(crate::stream::read_body(file));
            }
        }

        Ok(request_builder.headers(headers))
    }
}
