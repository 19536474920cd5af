//! Engine configuration.

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid TOML configuration: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("invalid JSON configuration: {0}")]
    Json(#[from] serde_json::Error),
    #[error("{0} must not be empty")]
    EmptyToken(&'static str),
}

/// Operator tokens recognized at the end of a raw value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OperatorTokens {
    pub insert: String,
    pub remove: String,
    pub default_value: String,
}

impl Default for OperatorTokens {
    fn default() -> Self {
        OperatorTokens {
            insert: "!+".to_string(),
            remove: "!-".to_string(),
            default_value: "!d".to_string(),
        }
    }
}

/// ```
/// use config_edit::EngineConfig;
///
/// let config = EngineConfig::from_toml_str(r#"
///     enabled = true
///     tag_marker = "@"
///
///     [operators]
///     insert = "+="
/// "#).unwrap();
/// assert_eq!(config.operators.insert, "+=");
/// assert_eq!(config.operators.remove, "!-");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// A disabled engine turns the batch driver into a no-op.
    pub enabled: bool,
    pub operators: OperatorTokens,
    /// Prefix marking a tag reference in a default-value directive.
    pub tag_marker: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            enabled: true,
            operators: OperatorTokens::default(),
            tag_marker: "!".to_string(),
        }
    }
}

impl EngineConfig {
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: EngineConfig = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_str(text: &str) -> Result<Self, ConfigError> {
        let config: EngineConfig = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let tokens = [
            ("operators.insert", &self.operators.insert),
            ("operators.remove", &self.operators.remove),
            ("operators.default_value", &self.operators.default_value),
            ("tag_marker", &self.tag_marker),
        ];
        match tokens.iter().find(|(_, token)| token.is_empty()) {
            Some((name, _)) => Err(ConfigError::EmptyToken(*name)),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_document_is_default() {
        assert_eq!(EngineConfig::from_toml_str("").unwrap(), EngineConfig::default());
        assert_eq!(EngineConfig::from_json_str("{}").unwrap(), EngineConfig::default());
    }

    #[test]
    fn test_disabled_flag() {
        let config = EngineConfig::from_json_str(r#"{"enabled": false}"#).unwrap();
        assert!(!config.enabled);
        assert_eq!(config.tag_marker, "!");
    }

    #[test]
    fn test_empty_token_rejected() {
        let err = EngineConfig::from_toml_str("[operators]\nremove = \"\"").unwrap_err();
        assert!(matches!(err, ConfigError::EmptyToken("operators.remove")));
    }

    #[test]
    fn test_malformed_toml() {
        assert!(matches!(EngineConfig::from_toml_str("enabled = ="), Err(ConfigError::Toml(_))));
    }
}
