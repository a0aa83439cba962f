//! Comment data models

use crate::types::{CommentId, NodeId, Target, UserId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A platform user, as stored on the comments they author
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub fullname: String,
    /// Profile url
    pub url: String,
    /// Used only for avatar hashing, never serialized into views
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

impl User {
    pub fn new(id: impl Into<String>, fullname: impl Into<String>) -> Self {
        let id = UserId::new(id);
        let url = format!("/{}/", id);
        Self {
            id,
            fullname: fullname.into(),
            url,
            email: None,
        }
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = url.into();
        self
    }
}

/// A comment attached to a node or to another comment
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Comment {
    /// Unique comment identifier
    pub id: CommentId,
    /// Node whose thread this comment belongs to
    pub root: NodeId,
    /// Author snapshot taken at creation
    pub author: User,
    /// What this comment replies to
    pub target: Target,
    /// Sanitized comment content
    pub content: String,
    pub visibility: Visibility,
    pub date_created: DateTime<Utc>,
    pub date_modified: DateTime<Utc>,
    /// Set once the comment has been edited
    #[serde(default)]
    pub modified: bool,
    /// Soft-delete flag; content is retained
    #[serde(default)]
    pub is_deleted: bool,
    /// One report per reporting user
    #[serde(default)]
    pub reports: HashMap<UserId, AbuseReport>,
}

impl Comment {
    /// Replace content and visibility, refreshing date_modified
    pub fn edit(&mut self, content: impl Into<String>, visibility: Visibility) {
        self.content = content.into();
        self.visibility = visibility;
        self.modified = true;
        self.date_modified = Utc::now();
    }

    /// Mark the comment deleted without touching content or replies
    pub fn soft_delete(&mut self) {
        self.is_deleted = true;
    }

    /// Record a report, replacing any earlier report by the same user
    pub fn report_abuse(&mut self, reporter: &UserId, report: AbuseReport) {
        self.reports.insert(reporter.clone(), report);
    }

    /// Report filed by this user, if any
    pub fn report_by(&self, user: &UserId) -> Option<&AbuseReport> {
        self.reports.get(user)
    }

    pub fn is_public(&self) -> bool {
        self.visibility == Visibility::Public
    }

    pub fn is_authored_by(&self, user: &UserId) -> bool {
        &self.author.id == user
    }

    pub fn state(&self) -> CommentState {
        if self.is_deleted {
            CommentState::Deleted
        } else if self.modified {
            CommentState::Edited
        } else {
            CommentState::Active
        }
    }
}

/// Who may see a comment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    /// Anyone who can view the node
    Public,
    /// Only users with edit rights on the node
    Private,
}

impl Visibility {
    /// Wire string ("public" / "private")
    pub fn as_str(&self) -> &'static str {
        match self {
            Visibility::Public => "public",
            Visibility::Private => "private",
        }
    }

    /// Parse the wire string; anything else is rejected
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "public" => Some(Visibility::Public),
            "private" => Some(Visibility::Private),
            _ => None,
        }
    }
}

impl std::fmt::Display for Visibility {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A user's abuse report on a comment
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AbuseReport {
    /// Report category, e.g. "spam"
    #[serde(rename = "type")]
    pub category: String,
    #[serde(default)]
    pub text: String,
}

impl AbuseReport {
    pub fn new(category: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            category: category.into(),
            text: text.into(),
        }
    }
}

/// Comment lifecycle state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CommentState {
    /// Never edited
    Active,
    /// Edited at least once
    Edited,
    /// Soft-deleted; terminal
    Deleted,
}

impl CommentState {
    /// Check if the comment can still be listed and mutated
    pub fn is_live(&self) -> bool {
        !matches!(self, CommentState::Deleted)
    }
}
