use easyquest_interface::ResponseHead;

use crate::{Error, Result, StatusCode};

/// The result of a call: status, headers and a body decoded into `T`.
///
/// `T` picks how the body is decoded, see [`crate::FromBody`].
#[derive(Debug, Clone)]
pub struct Response<T> {
    status: StatusCode,
    headers: Vec<(String, String)>,
    content_length: Option<u64>,
    body: T,
}

impl<T> Response<T> {
    pub(crate) fn new(head: ResponseHead, body: T) -> Self {
        Self {
            status: StatusCode::new(head.status),
            headers: head.headers,
            content_length: head.content_length,
            body,
        }
    }

    /// The response status.
    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// Every response header in the order received. A header present more than once appears
    /// once per value.
    pub fn headers(&self) -> &[(String, String)] {
        &self.headers
    }

    /// The values of the header `name`, compared case-insensitively.
    pub fn get_header(&self, name: &str) -> Vec<&str> {
        self.headers
            .iter()
            .filter(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
            .collect()
    }

    /// The `content-length` announced by the server, if any.
    pub fn content_length(&self) -> Option<u64> {
        self.content_length
    }

    /// The decoded body.
    pub fn body(&self) -> &T {
        &self.body
    }

    /// Takes the decoded body, dropping status and headers.
    pub fn into_body(self) -> T {
        self.body
    }

    /// Applies `f` to the body, keeping status and headers.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Response<U> {
        Response {
            status: self.status,
            headers: self.headers,
            content_length: self.content_length,
            body: f(self.body),
        }
    }

    /// Returns the response as-is, or [`Error::NonSuccessfulStatusCode`] if the status code
    /// does not indicate success.
    #[inline]
    pub fn with_successful_status(self) -> Result<Self> {
        if self.status.is_successful() {
            Ok(self)
        } else {
            Err(Error::NonSuccessfulStatusCode(self.status))
        }
    }
}

impl<T> Response<Result<T>> {
    pub(crate) fn transpose(self) -> Result<Response<T>> {
        let body = self.body?;
        Ok(Response {
            status: self.status,
            headers: self.headers,
            content_length: self.content_length,
            body,
        })
    }
}
