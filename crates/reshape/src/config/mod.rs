//! Configuration file for the transformer host.

mod transformers;

use std::collections::HashSet;
use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};
use tracing::info;

pub use crate::transformers::TransformerKind;
pub use transformers::TransformerConfig;

use crate::registry::{FailurePolicy, TransformerRegistry};

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct Config {
    /// What the host does when a transformer panics.
    #[serde(default)]
    pub on_failure: FailurePolicy,
    /// Transformers to register, in application order.
    pub transformers: Vec<TransformerConfig>,
}

impl Config {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, anyhow::Error> {
        let path = path.as_ref();
        if !path.exists() {
            anyhow::bail!("Configuration file not found: {}", path.display());
        }

        info!("Loading configuration from {}", path.display());
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Error loading configuration: {}", path.display()))?;
        Self::from_yaml(&contents)
    }

    pub fn from_yaml(contents: &str) -> Result<Self, anyhow::Error> {
        let config: Config = serde_yaml::from_str(contents)
            .map_err(|e| anyhow::anyhow!("Error loading configuration: {e}"))?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), anyhow::Error> {
        if self.transformers.is_empty() {
            anyhow::bail!("No transformers configured. Add at least one entry to 'transformers'");
        }

        let mut seen = HashSet::new();
        for (index, entry) in self.transformers.iter().enumerate() {
            entry
                .validate()
                .with_context(|| format!("Invalid transformer at index {index}"))?;

            // Resolved names must be unique, including defaults.
            let transformer = entry.build()?;
            let name = transformer.name().to_string();
            if !seen.insert(name.clone()) {
                anyhow::bail!("Duplicate transformer name '{name}' at index {index}");
            }
        }
        Ok(())
    }

    pub fn build_registry(&self) -> Result<TransformerRegistry, anyhow::Error> {
        let mut registry = TransformerRegistry::with_policy(self.on_failure);
        for entry in &self.transformers {
            registry.register(entry.build()?)?;
        }
        info!("Registered {} transformer(s)", registry.len());
        Ok(registry)
    }
}
