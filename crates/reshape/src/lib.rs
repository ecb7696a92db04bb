// Library exports for the transformer host and its tests

// ===== Extension contract =====
pub mod response;
pub mod serve_event;
pub mod transformer;

// ===== Host side =====
pub mod config;
pub mod registry;

// ===== Examples and tooling =====
pub mod cli;
pub mod transformers;

pub use registry::{FailurePolicy, RegistryError, TransformerRegistry};
pub use response::{Headers, Response, ResponseBuilder};
pub use serve_event::{LoggedRequest, ServeEvent, StubMapping};
pub use transformer::{simple_type_name, ResponseTransformer};
