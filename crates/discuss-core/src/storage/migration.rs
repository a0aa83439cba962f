//! Comment document format and schema migration

use crate::comment::Comment;
use crate::error::{DiscussError, Result};
use crate::types::ProtocolVersion;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Current schema version
pub const CURRENT_SCHEMA_VERSION: &str = "1.0";

/// On-disk comment document with schema version
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommentFile {
    /// Schema version for migration
    pub schema_version: String,
    /// The comment data
    pub comment: Comment,
    /// Store-assigned creation sequence; orders comments created in the same instant
    #[serde(default)]
    pub sequence: u64,
    /// Extra fields for forward compatibility
    #[serde(flatten, default)]
    pub extra: HashMap<String, serde_json::Value>,
}

impl CommentFile {
    /// Create a new comment file with current schema version
    pub fn new(comment: Comment) -> Self {
        Self {
            schema_version: CURRENT_SCHEMA_VERSION.to_string(),
            comment,
            sequence: 0,
            extra: HashMap::new(),
        }
    }

    pub fn with_sequence(mut self, sequence: u64) -> Self {
        self.sequence = sequence;
        self
    }

    /// Get the comment, consuming the file
    pub fn into_comment(self) -> Comment {
        self.comment
    }

    /// Parse schema version
    pub fn parse_version(&self) -> Option<ProtocolVersion> {
        ProtocolVersion::parse(&self.schema_version)
    }
}

/// Comment document schema migrator
pub struct CommentMigrator;

impl CommentMigrator {
    /// Migrate a comment file to the current schema version
    pub fn migrate(mut file: CommentFile) -> Result<CommentFile> {
        let version = file.parse_version().ok_or_else(|| {
            DiscussError::UnsupportedSchemaVersion(file.schema_version.clone())
        })?;

        let current = ProtocolVersion::V1_0;
        if !version.is_compatible(&current) {
            return Err(DiscussError::UnsupportedSchemaVersion(format!(
                "{} (expected {}.x)",
                file.schema_version, current.major
            )));
        }

        // Minor versions only ever add defaulted fields
        file.schema_version = CURRENT_SCHEMA_VERSION.to_string();
        Ok(file)
    }

    /// Check if a file needs migration
    pub fn needs_migration(file: &CommentFile) -> bool {
        file.schema_version != CURRENT_SCHEMA_VERSION
    }
}
