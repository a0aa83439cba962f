//! Comment builder for fluent API

use super::model::{Comment, User, Visibility};
use crate::error::{DiscussError, Result};
use crate::types::{CommentId, NodeId, Target};
use chrono::Utc;
use std::collections::HashMap;

/// Builder for creating comments with fluent API
pub struct CommentBuilder {
    root: NodeId,
    author: User,
    target: Target,
    content: Option<String>,
    visibility: Visibility,
}

impl CommentBuilder {
    /// Create a builder for a top-level comment on `root`
    pub fn new(root: NodeId, author: User) -> Self {
        Self {
            target: Target::Node(root.clone()),
            root,
            author,
            content: None,
            visibility: Visibility::Public,
        }
    }

    /// Reply to an existing target instead of the root
    pub fn target(mut self, target: Target) -> Self {
        self.target = target;
        self
    }

    /// Reply to a comment
    pub fn reply_to(self, parent: CommentId) -> Self {
        self.target(Target::Comment(parent))
    }

    /// Set the comment content
    pub fn content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }

    pub fn visibility(mut self, visibility: Visibility) -> Self {
        self.visibility = visibility;
        self
    }

    pub fn private(self) -> Self {
        self.visibility(Visibility::Private)
    }

    /// Build the comment
    pub fn build(self) -> Result<Comment> {
        let content = self.content.ok_or_else(|| {
            DiscussError::InvalidRequest("Comment content is required".to_string())
        })?;

        if content.trim().is_empty() {
            return Err(DiscussError::InvalidRequest(
                "Comment content cannot be empty".to_string(),
            ));
        }

        let now = Utc::now();

        Ok(Comment {
            id: CommentId::new(),
            root: self.root,
            author: self.author,
            target: self.target,
            content,
            visibility: self.visibility,
            date_created: now,
            date_modified: now,
            modified: false,
            is_deleted: false,
            reports: HashMap::new(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn alice() -> User {
        User::new("alice", "Alice")
    }

    #[test]
    fn test_basic_builder() {
        let comment = CommentBuilder::new(NodeId::new("n1"), alice())
            .content("Test comment")
            .build()
            .unwrap();

        assert_eq!(comment.content, "Test comment");
        assert_eq!(comment.target, Target::Node(NodeId::new("n1")));
        assert_eq!(comment.visibility, Visibility::Public);
        assert_eq!(comment.date_created, comment.date_modified);
        assert!(!comment.is_deleted);
        assert!(!comment.modified);
    }

    #[test]
    fn test_reply_builder() {
        let parent = CommentId::new();
        let comment = CommentBuilder::new(NodeId::new("n1"), alice())
            .reply_to(parent.clone())
            .content("Reply")
            .private()
            .build()
            .unwrap();

        assert_eq!(comment.target, Target::Comment(parent));
        assert_eq!(comment.root, NodeId::new("n1"));
        assert_eq!(comment.visibility, Visibility::Private);
    }

    #[test]
    fn test_builder_without_content_fails() {
        let result = CommentBuilder::new(NodeId::new("n1"), alice()).build();
        assert!(result.unwrap_err().is_invalid_request());
    }

    #[test]
    fn test_builder_with_empty_content_fails() {
        let result = CommentBuilder::new(NodeId::new("n1"), alice())
            .content("   ")
            .build();
        assert!(result.is_err());
    }
}
