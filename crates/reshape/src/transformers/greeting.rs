use crate::response::Response;
use crate::serve_event::ServeEvent;
use crate::transformer::ResponseTransformer;

pub const DEFAULT_GREETING_NAME: &str = "MyResponseTransformerExtensionJava";

/// Replaces the body with `Hey from <name>`. Status and headers are kept.
#[derive(Debug, Clone)]
pub struct GreetingTransformer {
    name: String,
}

impl GreetingTransformer {
    pub fn named(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl Default for GreetingTransformer {
    fn default() -> Self {
        Self::named(DEFAULT_GREETING_NAME)
    }
}

impl ResponseTransformer for GreetingTransformer {
    fn transform(&self, response: &Response, _event: &ServeEvent) -> Response {
        Response::like(response)
            .body(format!("Hey from {}", self.name))
            .build()
    }

    fn name(&self) -> &str {
        &self.name
    }
}
