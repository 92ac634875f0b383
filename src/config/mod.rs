//! @acp:module "Configuration"
//! @acp:summary "Application configuration loading and defaults"
//! @acp:domain cli
//! @acp:layer config

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::diagnosis::{CliOverrides, TemplateVarsOverride};

fn default_version() -> String {
    "1.0.0".to_string()
}

fn default_true() -> bool {
    true
}

/// @acp:summary "Main quiz configuration structure"
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    #[serde(default = "default_version")]
    pub version: String,

    /// Project content file layered over the built-in copy
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<PathBuf>,

    /// Ask the user which zone they think is the problem
    #[serde(default = "default_true")]
    pub ask_perceived: bool,

    /// Overrides the content file's twist threshold
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub twist_threshold: Option<f64>,

    /// Overrides the content file's default template vars, field by field
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template_vars: Option<TemplateVarsOverride>,

    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: default_version(),
            content: None,
            ask_perceived: true,
            twist_threshold: None,
            template_vars: None,
            logging: LoggingConfig::default(),
        }
    }
}

impl Config {
    /// @acp:summary "Load config from .quiz.config.json (or a .yaml/.yml file)"
    pub fn load<P: AsRef<std::path::Path>>(path: P) -> crate::Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        match path.extension().and_then(|e| e.to_str()) {
            Some("yaml") | Some("yml") => Ok(serde_yaml::from_str(&content)?),
            _ => Ok(serde_json::from_str(&content)?),
        }
    }

    /// Content file path, falling back to `.quiz/content.json` when present
    pub fn content_path(&self) -> Option<PathBuf> {
        self.content.clone().or_else(|| {
            let fallback = default_content_path();
            fallback.exists().then_some(fallback)
        })
    }

    /// Loader overrides taken from this config
    pub fn overrides(&self) -> CliOverrides {
        let vars = self.template_vars.clone().unwrap_or_default();
        CliOverrides {
            twist_threshold: self.twist_threshold,
            expert_name: vars.expert_name,
            product: vars.product,
            code_word: vars.code_word,
        }
    }
}

fn default_content_path() -> PathBuf {
    PathBuf::from(".quiz/content.json")
}

/// @acp:summary "Logging configuration"
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Default filter when RUST_LOG is unset
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "warn".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_from_empty_json() {
        let config: Config = serde_json::from_str("{}").unwrap();
        assert_eq!(config, Config::default());
        assert!(config.ask_perceived);
        assert_eq!(config.logging.level, "warn");
    }

    #[test]
    fn test_load_round_trips_written_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(".quiz.config.json");
        let config = Config {
            ask_perceived: false,
            twist_threshold: Some(0.3),
            content: Some(PathBuf::from("copy.yaml")),
            ..Default::default()
        };
        std::fs::write(&path, serde_json::to_string_pretty(&config).unwrap()).unwrap();
        assert_eq!(Config::load(&path).unwrap(), config);
    }

    #[test]
    fn test_load_yaml_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("quiz.config.yaml");
        std::fs::write(&path, "askPerceived: false\ntemplateVars:\n  codeWord: SPRINT\n").unwrap();

        let config = Config::load(&path).unwrap();
        assert!(!config.ask_perceived);
        let vars = config.template_vars.unwrap();
        assert_eq!(vars.code_word.as_deref(), Some("SPRINT"));
        assert_eq!(vars.expert_name, None);
    }

    #[test]
    fn test_overrides_carry_vars() {
        let config = Config {
            template_vars: Some(TemplateVarsOverride {
                expert_name: Some("Anna".to_string()),
                ..Default::default()
            }),
            ..Default::default()
        };
        let overrides = config.overrides();
        assert_eq!(overrides.expert_name.as_deref(), Some("Anna"));
        assert_eq!(overrides.product, None);
        assert_eq!(overrides.twist_threshold, None);
    }
}
