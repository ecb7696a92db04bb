use super::{Headers, Response};
use bytes::Bytes;
use hyper::http::{HeaderName, HeaderValue};
use hyper::StatusCode;

/// Builder for [`Response`].
///
/// Each setter overrides one field. Fields that are never set keep whatever
/// the builder started from: the defaults for [`ResponseBuilder::new`], or the
/// source response for [`ResponseBuilder::from`].
#[derive(Debug, Clone, Default)]
pub struct ResponseBuilder {
    status: StatusCode,
    headers: Headers,
    body: Bytes,
}

impl ResponseBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn status(mut self, status: StatusCode) -> Self {
        self.status = status;
        self
    }

    /// Replace every header.
    pub fn headers(mut self, headers: Headers) -> Self {
        self.headers = headers;
        self
    }

    pub fn body(mut self, body: impl Into<Bytes>) -> Self {
        self.body = body.into();
        self
    }

    pub fn header(mut self, name: &str, value: &str) -> Self {
        self.headers.append_str(name, value);
        self
    }

    pub fn merge_headers<H, K, V>(mut self, headers: H) -> Self
    where
        H: IntoIterator<Item = (K, V)>,
        HeaderName: TryFrom<K>,
        HeaderValue: TryFrom<V>,
    {
        for (key, value) in headers {
            if let (Ok(name), Ok(value)) = (HeaderName::try_from(key), HeaderValue::try_from(value))
            {
                self.headers.append(name, value);
            }
        }
        self
    }

    pub fn build(self) -> Response {
        Response {
            status: self.status,
            headers: self.headers,
            body: self.body,
        }
    }
}

impl From<&Response> for ResponseBuilder {
    fn from(response: &Response) -> Self {
        Self {
            status: response.status,
            headers: response.headers.clone(),
            body: response.body.clone(),
        }
    }
}
