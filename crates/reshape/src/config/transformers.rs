//! Transformer entries of the configuration file.

use crate::transformer::ResponseTransformer;
use crate::transformers::{builtin, TransformerKind};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct TransformerConfig {
    pub kind: TransformerKind,
    /// Registration name. Required for `suffix`; ignored for `self-named`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Text appended by `suffix`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suffix: Option<String>,
    /// Only honoured by `suffix`; the examples are opt-in.
    #[serde(default)]
    pub apply_globally: bool,
}

impl TransformerConfig {
    pub fn validate(&self) -> Result<(), anyhow::Error> {
        if let Some(name) = &self.name {
            if name.trim().is_empty() {
                anyhow::bail!("Transformer name must not be empty (kind: {:?})", self.kind);
            }
        }

        if self.kind == TransformerKind::Suffix {
            if self.name.is_none() {
                anyhow::bail!("'suffix' transformer requires a 'name'");
            }
            if self.suffix.is_none() {
                anyhow::bail!(
                    "'suffix' transformer '{}' requires a 'suffix'",
                    self.name.as_deref().unwrap_or_default()
                );
            }
        }
        Ok(())
    }

    /// Instantiate the configured transformer.
    pub fn build(&self) -> Result<Arc<dyn ResponseTransformer>, anyhow::Error> {
        self.validate()?;

        builtin(
            self.kind,
            self.name.as_deref(),
            self.suffix.as_deref(),
            self.apply_globally,
        )
        .ok_or_else(|| anyhow::anyhow!("Incomplete '{:?}' transformer entry", self.kind))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(yaml: &str) -> TransformerConfig {
        serde_yaml::from_str(yaml).unwrap()
    }

    #[test]
    fn test_greeting_default_name() {
        let transformer = parse("kind: greeting").build().unwrap();
        assert_eq!(transformer.name(), "MyResponseTransformerExtensionJava");
    }

    #[test]
    fn test_greeting_custom_name() {
        let transformer = parse("kind: greeting\nname: Hello").build().unwrap();
        assert_eq!(transformer.name(), "Hello");
    }

    #[test]
    fn test_suffix_requires_name_and_suffix() {
        let err = parse("kind: suffix\nsuffix: '!'").build().err().unwrap();
        assert!(err.to_string().contains("requires a 'name'"));

        let err = parse("kind: suffix\nname: bang").build().err().unwrap();
        assert!(err.to_string().contains("requires a 'suffix'"));
    }

    #[test]
    fn test_suffix_global_flag() {
        let transformer = parse("kind: suffix\nname: bang\nsuffix: '!'\napply-globally: true")
            .build()
            .unwrap();
        assert!(transformer.apply_globally());
    }

    #[test]
    fn test_blank_name_rejected() {
        assert!(parse("kind: greeting\nname: '  '").validate().is_err());
    }

    #[test]
    fn test_unknown_kind_rejected() {
        let result: Result<TransformerConfig, _> = serde_yaml::from_str("kind: rot13");
        assert!(result.is_err());
    }
}
