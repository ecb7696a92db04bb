use crate::response::Response;
use crate::serve_event::ServeEvent;
use crate::transformer::{simple_type_name, ResponseTransformer};

/// Named after its own type; replaces the body with `Response from <type>`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SelfNamedTransformer;

impl ResponseTransformer for SelfNamedTransformer {
    fn transform(&self, response: &Response, _event: &ServeEvent) -> Response {
        Response::like(response)
            .body(format!("Response from {}", self.name()))
            .build()
    }

    fn name(&self) -> &str {
        simple_type_name::<Self>()
    }
}
