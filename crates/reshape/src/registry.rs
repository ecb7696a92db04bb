//! Host-side transformer registry and dispatch.
//!
//! Transformers are registered once at startup. For every served request the
//! registry selects the global transformers plus the ones the matched stub
//! references, and applies them in registration order, feeding each one the
//! previous one's output.

use crate::response::Response;
use crate::serve_event::ServeEvent;
use crate::transformer::ResponseTransformer;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::any::Any;
use std::collections::{HashMap, HashSet};
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use tracing::{debug, error, warn};

#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    #[error("Transformer name must not be empty")]
    EmptyName,
    #[error("A transformer named '{0}' is already registered")]
    DuplicateName(String),
}

/// What the host does when a transformer panics.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FailurePolicy {
    /// Resume the panic in the caller.
    #[default]
    Propagate,
    /// Log the failure and continue with the failing step's input.
    FallBack,
}

/// A registered transformer with the flags captured at registration.
#[derive(Clone)]
pub struct Registration {
    name: String,
    global: bool,
    transformer: Arc<dyn ResponseTransformer>,
}

impl Registration {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_global(&self) -> bool {
        self.global
    }

    pub fn transformer(&self) -> &Arc<dyn ResponseTransformer> {
        &self.transformer
    }

    fn applies_to(&self, event: &ServeEvent) -> bool {
        self.global || event.stub().references(&self.name)
    }
}

impl std::fmt::Debug for Registration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Registration")
            .field("name", &self.name)
            .field("global", &self.global)
            .finish()
    }
}

#[derive(Debug, Default)]
pub struct TransformerRegistry {
    registrations: Vec<Registration>,
    by_name: HashMap<String, usize>,
    policy: FailurePolicy,
    /// Unknown names already reported at `warn`.
    warned_unknown: Mutex<HashSet<String>>,
}

impl TransformerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_policy(policy: FailurePolicy) -> Self {
        Self {
            policy,
            ..Self::default()
        }
    }

    pub fn policy(&self) -> FailurePolicy {
        self.policy
    }

    /// Register a transformer. Names must be non-empty and unique.
    pub fn register(
        &mut self,
        transformer: Arc<dyn ResponseTransformer>,
    ) -> Result<(), RegistryError> {
        let name = transformer.name().to_string();
        if name.is_empty() {
            return Err(RegistryError::EmptyName);
        }
        if self.by_name.contains_key(&name) {
            return Err(RegistryError::DuplicateName(name));
        }

        let global = transformer.apply_globally();
        debug!("Registered transformer '{}' (global={})", name, global);

        self.by_name.insert(name.clone(), self.registrations.len());
        self.registrations.push(Registration {
            name,
            global,
            transformer,
        });
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&Arc<dyn ResponseTransformer>> {
        self.by_name
            .get(name)
            .map(|&index| &self.registrations[index].transformer)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.registrations.iter().map(|r| r.name.as_str())
    }

    pub fn registrations(&self) -> &[Registration] {
        &self.registrations
    }

    pub fn len(&self) -> usize {
        self.registrations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.registrations.is_empty()
    }

    /// Transformers that apply to `event`, in registration order.
    pub fn select(&self, event: &ServeEvent) -> Vec<&Registration> {
        for name in &event.stub().transformers {
            if !self.by_name.contains_key(name) {
                self.report_unknown(name, event);
            }
        }

        self.registrations
            .iter()
            .filter(|r| r.applies_to(event))
            .collect()
    }

    /// Run every applicable transformer over `response`.
    pub fn dispatch(&self, response: &Response, event: &ServeEvent) -> Response {
        let mut current = response.clone();
        for registration in self.select(event) {
            current = self.run_one(registration, &current, event);
        }
        current
    }

    /// Warn the first time a name is seen, then drop to `debug`.
    fn report_unknown(&self, name: &str, event: &ServeEvent) {
        let first = self.warned_unknown.lock().insert(name.to_string());
        if first {
            warn!(
                "Stub {} references unknown transformer '{}', skipping",
                stub_label(event),
                name
            );
        } else {
            debug!("Skipping unknown transformer '{}'", name);
        }
    }

    fn run_one(
        &self,
        registration: &Registration,
        response: &Response,
        event: &ServeEvent,
    ) -> Response {
        debug!(
            "Applying transformer '{}' to event {}",
            registration.name,
            event.id()
        );

        let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
            registration.transformer.transform(response, event)
        }));

        match outcome {
            Ok(transformed) => transformed,
            Err(payload) => match self.policy {
                FailurePolicy::Propagate => panic::resume_unwind(payload),
                FailurePolicy::FallBack => {
                    error!(
                        "Transformer '{}' failed for event {}: {}; returning untransformed response",
                        registration.name,
                        event.id(),
                        panic_message(payload.as_ref())
                    );
                    response.clone()
                }
            },
        }
    }
}

fn stub_label(event: &ServeEvent) -> String {
    let stub = event.stub();
    stub.name
        .as_deref()
        .or(stub.id.as_deref())
        .map(|label| format!("'{label}'"))
        .unwrap_or_else(|| "<unnamed>".to_string())
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    if let Some(message) = payload.downcast_ref::<&str>() {
        message
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.as_str()
    } else {
        "non-string panic payload"
    }
}
