//! Immutable HTTP response value handed to and returned by transformers.
//!
//! A [`Response`] is never modified in place. Transformers derive a new one
//! from their input with [`Response::like`], overriding only the fields they
//! care about.

mod builder;
mod headers;

pub use builder::ResponseBuilder;
pub use headers::Headers;

use bytes::Bytes;
use http_body_util::Full;
use hyper::http::response::Parts;
use hyper::StatusCode;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "ResponseDocument", into = "ResponseDocument")]
pub struct Response {
    status: StatusCode,
    headers: Headers,
    body: Bytes,
}

impl Response {
    /// Builder starting from 200 OK, no headers, empty body.
    pub fn builder() -> ResponseBuilder {
        ResponseBuilder::new()
    }

    /// Builder pre-filled with a copy of `response`.
    pub fn like(response: &Response) -> ResponseBuilder {
        ResponseBuilder::from(response)
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn headers(&self) -> &Headers {
        &self.headers
    }

    pub fn body(&self) -> &Bytes {
        &self.body
    }

    /// Body as text, replacing invalid UTF-8 sequences.
    pub fn body_text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    /// Build from the parts of a hyper response and its collected body.
    pub fn from_parts(parts: &Parts, body: Bytes) -> Self {
        Self {
            status: parts.status,
            headers: Headers::from(&parts.headers),
            body,
        }
    }

    pub fn into_hyper(self) -> hyper::Response<Full<Bytes>> {
        let mut response = hyper::Response::new(Full::new(self.body));
        *response.status_mut() = self.status;
        *response.headers_mut() = self.headers.to_header_map();
        response
    }
}

impl Default for Response {
    fn default() -> Self {
        Self {
            status: StatusCode::OK,
            headers: Headers::default(),
            body: Bytes::new(),
        }
    }
}

/// JSON shape of a response: `{"status": 200, "headers": [[k, v]], "body": "..."}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ResponseDocument {
    #[serde(default = "default_status")]
    status: u16,
    #[serde(default)]
    headers: Headers,
    #[serde(default)]
    body: String,
}

fn default_status() -> u16 {
    200
}

impl TryFrom<ResponseDocument> for Response {
    type Error = String;

    fn try_from(doc: ResponseDocument) -> Result<Self, Self::Error> {
        let status = StatusCode::from_u16(doc.status)
            .map_err(|_| format!("invalid status code: {}", doc.status))?;
        Ok(Self {
            status,
            headers: doc.headers,
            body: Bytes::from(doc.body),
        })
    }
}

impl From<Response> for ResponseDocument {
    fn from(response: Response) -> Self {
        Self {
            status: response.status.as_u16(),
            body: response.body_text(),
            headers: response.headers,
        }
    }
}
