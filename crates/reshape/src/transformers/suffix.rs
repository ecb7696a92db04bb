use crate::response::Response;
use crate::serve_event::ServeEvent;
use crate::transformer::ResponseTransformer;
use bytes::{BufMut, BytesMut};

/// Appends a fixed suffix to whatever body it receives.
///
/// Not idempotent: running it twice appends the suffix twice.
#[derive(Debug, Clone)]
pub struct SuffixTransformer {
    name: String,
    suffix: String,
    global: bool,
}

impl SuffixTransformer {
    pub fn new(name: impl Into<String>, suffix: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            suffix: suffix.into(),
            global: false,
        }
    }

    pub fn globally(mut self, global: bool) -> Self {
        self.global = global;
        self
    }
}

impl ResponseTransformer for SuffixTransformer {
    fn transform(&self, response: &Response, _event: &ServeEvent) -> Response {
        let mut body = BytesMut::with_capacity(response.body().len() + self.suffix.len());
        body.put_slice(response.body());
        body.put_slice(self.suffix.as_bytes());

        Response::like(response).body(body.freeze()).build()
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn apply_globally(&self) -> bool {
        self.global
    }
}
