//! Read-only record of a served request and the stub that matched it.
//!
//! The host builds a [`ServeEvent`] after stub matching and hands it to every
//! transformer it invokes. Transformers only read from it.

use crate::response::Headers;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Request as received by the mock server.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoggedRequest {
    pub method: String,
    pub url: String,
    #[serde(default)]
    pub headers: Headers,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
    #[serde(default = "Utc::now")]
    pub logged_at: DateTime<Utc>,
}

impl LoggedRequest {
    pub fn new(method: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            method: method.into(),
            url: url.into(),
            headers: Headers::new(),
            body: None,
            logged_at: Utc::now(),
        }
    }
}

/// Stub metadata relevant to transformers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StubMapping {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Names of the transformers this stub opts into.
    #[serde(default)]
    pub transformers: Vec<String>,
    #[serde(default = "empty_parameters")]
    pub transformer_parameters: serde_json::Value,
}

fn empty_parameters() -> serde_json::Value {
    serde_json::Value::Object(serde_json::Map::new())
}

impl Default for StubMapping {
    fn default() -> Self {
        Self {
            id: None,
            name: None,
            transformers: Vec::new(),
            transformer_parameters: empty_parameters(),
        }
    }
}

impl StubMapping {
    pub fn with_transformers<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            transformers: names.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    /// Whether this stub references the transformer `name`. Exact match.
    pub fn references(&self, name: &str) -> bool {
        self.transformers.iter().any(|t| t == name)
    }

    pub fn transformer_parameters(&self) -> &serde_json::Value {
        &self.transformer_parameters
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServeEvent {
    #[serde(default = "Uuid::new_v4")]
    id: Uuid,
    request: LoggedRequest,
    #[serde(default)]
    stub: StubMapping,
}

impl ServeEvent {
    pub fn new(request: LoggedRequest, stub: StubMapping) -> Self {
        Self {
            id: Uuid::new_v4(),
            request,
            stub,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn request(&self) -> &LoggedRequest {
        &self.request
    }

    pub fn stub(&self) -> &StubMapping {
        &self.stub
    }
}
