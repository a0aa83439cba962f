//! Configuration management for discuss

use crate::error::{DiscussError, Result};
use chrono::format::{Item, StrftimeItems};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Comment content settings
    pub comments: CommentsConfig,
    /// Thread traversal settings
    pub threads: ThreadsConfig,
    /// Abuse reporting settings
    pub moderation: ModerationConfig,
    /// Serialized view settings
    pub display: DisplayConfig,
    /// Storage settings
    pub storage: StorageConfig,
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            DiscussError::Io(e).with_context(format!("Failed to read {}", path.display()))
        })?;
        Self::from_toml(&content)
    }

    /// Parse and validate configuration from TOML text
    pub fn from_toml(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Render configuration as TOML
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| DiscussError::Toml(e.to_string()))
    }

    /// Check value ranges
    pub fn validate(&self) -> Result<()> {
        if self.comments.max_length == 0 {
            return Err(DiscussError::Config(
                "comments.max_length must be greater than 0".to_string(),
            ));
        }
        if self.threads.max_depth == 0 {
            return Err(DiscussError::Config(
                "threads.max_depth must be greater than 0".to_string(),
            ));
        }
        if StrftimeItems::new(&self.display.date_format).any(|item| matches!(item, Item::Error)) {
            return Err(DiscussError::Config(format!(
                "display.date_format is not a valid strftime format: {}",
                self.display.date_format
            )));
        }
        if self.moderation.abuse_category.trim().is_empty() {
            return Err(DiscussError::Config(
                "moderation.abuse_category cannot be empty".to_string(),
            ));
        }
        if self.moderation.categories.iter().any(|c| c.trim().is_empty()) {
            return Err(DiscussError::Config(
                "moderation.categories cannot contain empty entries".to_string(),
            ));
        }
        Ok(())
    }
}

/// Comment content configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CommentsConfig {
    /// Maximum sanitized content length, in characters
    pub max_length: usize,
}

impl Default for CommentsConfig {
    fn default() -> Self {
        Self { max_length: 10000 }
    }
}

/// Thread traversal configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ThreadsConfig {
    /// Deepest reply level visited when collecting a discussion
    pub max_depth: usize,
}

impl Default for ThreadsConfig {
    fn default() -> Self {
        Self { max_depth: 256 }
    }
}

/// Abuse reporting configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ModerationConfig {
    /// Accepted report categories (empty accepts any non-blank category)
    pub categories: Vec<String>,
    /// Category that flags a comment as abuse in serialized views
    pub abuse_category: String,
}

impl Default for ModerationConfig {
    fn default() -> Self {
        Self {
            categories: Vec::new(),
            abuse_category: "spam".to_string(),
        }
    }
}

/// Serialized view configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// strftime format for dateCreated / dateModified
    pub date_format: String,
    /// Avatar size in pixels for discussion entries
    pub gravatar_size: u32,
    /// Use https for avatar urls
    pub gravatar_ssl: bool,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            date_format: "%m/%d/%y %H:%M:%S".to_string(),
            gravatar_size: 20,
            gravatar_ssl: true,
        }
    }
}

/// Storage configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Directory holding comment documents; empty means the platform data directory
    pub data_dir: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(".discuss"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.comments.max_length, 10000);
        assert_eq!(config.moderation.abuse_category, "spam");
        assert!(config.moderation.categories.is_empty());
        assert!(config.display.gravatar_ssl);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_serialization() {
        let config = Config::default();
        let toml = config.to_toml().unwrap();
        assert!(toml.contains("[comments]"));
        assert!(toml.contains("[threads]"));

        let config2 = Config::from_toml(&toml).unwrap();
        assert_eq!(config.threads.max_depth, config2.threads.max_depth);
        assert_eq!(config.display.date_format, config2.display.date_format);
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let config = Config::from_toml("[threads]\nmax_depth = 8\n").unwrap();
        assert_eq!(config.threads.max_depth, 8);
        assert_eq!(config.comments.max_length, 10000);
    }

    #[test]
    fn test_invalid_config() {
        assert!(Config::from_toml("[threads]\nmax_depth = 0\n").is_err());
        assert!(Config::from_toml("[moderation]\ncategories = [\" \"]\n").is_err());
        assert!(Config::from_toml("threads = 3").is_err());
        assert!(Config::from_toml("[display]\ndate_format = \"%Q\"\n").is_err());
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[comments]\nmax_length = 42\n").unwrap();

        let config = Config::load(&path).unwrap();
        assert_eq!(config.comments.max_length, 42);

        assert!(Config::load(&dir.path().join("missing.toml")).is_err());
    }
}
