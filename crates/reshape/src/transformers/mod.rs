//! Example transformers.
//!
//! - `greeting` - fixed name, body replaced with `Hey from <name>`
//! - `self_named` - name taken from the type, body `Response from <type>`
//! - `suffix` - appends to the existing body on every call

mod greeting;
mod self_named;
mod suffix;

pub use greeting::{GreetingTransformer, DEFAULT_GREETING_NAME};
pub use self_named::SelfNamedTransformer;
pub use suffix::SuffixTransformer;

use crate::transformer::ResponseTransformer;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Built-in transformer kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum TransformerKind {
    Greeting,
    SelfNamed,
    Suffix,
}

/// Instantiate a built-in transformer.
///
/// `name` overrides the greeting's default name and is required by `suffix`,
/// as is `suffix`. `global` is only honoured by `suffix`. Returns `None` when
/// a required argument is missing.
pub fn builtin(
    kind: TransformerKind,
    name: Option<&str>,
    suffix: Option<&str>,
    global: bool,
) -> Option<Arc<dyn ResponseTransformer>> {
    let transformer: Arc<dyn ResponseTransformer> = match kind {
        TransformerKind::Greeting => match name {
            Some(name) => Arc::new(GreetingTransformer::named(name)),
            None => Arc::new(GreetingTransformer::default()),
        },
        TransformerKind::SelfNamed => Arc::new(SelfNamedTransformer),
        TransformerKind::Suffix => {
            Arc::new(SuffixTransformer::new(name?, suffix?).globally(global))
        }
    };
    Some(transformer)
}
