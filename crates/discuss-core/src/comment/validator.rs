//! Comment request validation

use super::model::Visibility;
use crate::config::Config;
use crate::error::{DiscussError, Result};

/// Maximum comment length (default)
pub const MAX_COMMENT_LENGTH: usize = 10000;

/// Validator for comment input
#[derive(Debug, Clone)]
pub struct CommentValidator {
    max_length: usize,
    categories: Vec<String>,
}

impl CommentValidator {
    /// Create a new validator with default settings
    pub fn new() -> Self {
        Self {
            max_length: MAX_COMMENT_LENGTH,
            categories: Vec::new(),
        }
    }

    /// Create a new validator with custom max length
    pub fn with_max_length(max_length: usize) -> Self {
        Self {
            max_length,
            categories: Vec::new(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self {
            max_length: config.comments.max_length,
            categories: config.moderation.categories.clone(),
        }
    }

    /// Validate already-sanitized content
    pub fn validate_content(&self, content: &str) -> Result<()> {
        if content.trim().is_empty() {
            return Err(DiscussError::InvalidRequest(
                "Comment content cannot be empty".to_string(),
            ));
        }

        if content.chars().count() > self.max_length {
            return Err(DiscussError::InvalidRequest(format!(
                "Comment content exceeds maximum length of {} characters",
                self.max_length
            )));
        }

        Ok(())
    }

    /// Parse the `isPublic` field
    pub fn parse_visibility(&self, value: Option<&str>) -> Result<Visibility> {
        let value = value.ok_or_else(|| {
            DiscussError::InvalidRequest("isPublic is required".to_string())
        })?;
        Visibility::parse(value).ok_or_else(|| {
            DiscussError::InvalidRequest(format!(
                "isPublic must be \"public\" or \"private\", got {:?}",
                value
            ))
        })
    }

    /// Validate a report category, returning it trimmed
    pub fn validate_category<'a>(&self, category: Option<&'a str>) -> Result<&'a str> {
        let category = category.map(str::trim).unwrap_or_default();
        if category.is_empty() {
            return Err(DiscussError::InvalidRequest(
                "Report category is required".to_string(),
            ));
        }

        if !self.categories.is_empty() && !self.categories.iter().any(|c| c == category) {
            return Err(DiscussError::InvalidRequest(format!(
                "Unknown report category: {}",
                category
            )));
        }

        Ok(category)
    }
}

impl Default for CommentValidator {
    fn default() -> Self {
        Self::new()
    }
}
