//! Serialized views returned to the web layer
//!
//! Field names follow the JSON contract of the comment API (camelCase,
//! `isPublic` as a `"public"`/`"private"` string).

use crate::access::{Actor, Node};
use crate::avatar::gravatar_url;
use crate::comment::{Comment, CommentState, User};
use crate::config::Config;
use crate::error::{DiscussError, Result};
use crate::types::{CommentId, UserId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Settings that shape serialized views
#[derive(Debug, Clone)]
pub struct ViewOptions {
    pub date_format: String,
    /// Report category that sets `isAbuse`
    pub abuse_category: String,
    pub gravatar_size: u32,
    pub gravatar_ssl: bool,
}

impl ViewOptions {
    pub fn from_config(config: &Config) -> Self {
        Self {
            date_format: config.display.date_format.clone(),
            abuse_category: config.moderation.abuse_category.clone(),
            gravatar_size: config.display.gravatar_size,
            gravatar_ssl: config.display.gravatar_ssl,
        }
    }

    fn format_date(&self, date: &DateTime<Utc>) -> Result<String> {
        use std::fmt::Write;

        let mut out = String::new();
        write!(out, "{}", date.format(&self.date_format)).map_err(|_| {
            DiscussError::Config(format!("invalid date format {:?}", self.date_format))
        })?;
        Ok(out)
    }
}

impl Default for ViewOptions {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

/// Author block of a serialized comment
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorView {
    pub id: UserId,
    pub url: String,
    pub name: String,
}

impl From<&User> for AuthorView {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.clone(),
            url: user.url.clone(),
            name: user.fullname.clone(),
        }
    }
}

/// A comment as seen by one actor
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SerializedComment {
    pub id: CommentId,
    pub author: AuthorView,
    pub date_created: String,
    pub date_modified: String,
    pub content: String,
    /// "public" or "private"
    pub is_public: String,
    /// Any reply exists, deleted or not
    pub has_children: bool,
    pub can_edit: bool,
    pub modified: bool,
    /// The actor has reported this comment under the abuse category
    pub is_abuse: bool,
}

impl SerializedComment {
    pub fn new(
        comment: &Comment,
        actor: &Actor,
        has_children: bool,
        options: &ViewOptions,
    ) -> Result<Self> {
        let is_abuse = actor
            .user_id()
            .and_then(|id| comment.report_by(id))
            .is_some_and(|report| report.category == options.abuse_category);

        Ok(Self {
            id: comment.id.clone(),
            author: AuthorView::from(&comment.author),
            date_created: options.format_date(&comment.date_created)?,
            date_modified: options.format_date(&comment.date_modified)?,
            content: comment.content.clone(),
            is_public: comment.visibility.as_str().to_string(),
            has_children,
            can_edit: actor.is_author_of(comment),
            modified: comment.modified,
            is_abuse,
        })
    }
}

/// One participant of a discussion
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiscussionEntry {
    pub url: String,
    pub fullname: String,
    pub is_contributor: bool,
    pub gravatar_url: String,
}

impl DiscussionEntry {
    pub fn new(user: &User, node: &Node, options: &ViewOptions) -> Self {
        Self {
            url: user.url.clone(),
            fullname: user.fullname.clone(),
            is_contributor: node.is_contributor(&user.id),
            gravatar_url: gravatar_url(user, options.gravatar_size, options.gravatar_ssl),
        }
    }
}

/// Comment counts for one thread
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThreadStats {
    pub total: usize,
    pub live: usize,
    /// Live comments changed since posting
    pub edited: usize,
    pub deleted: usize,
    /// Live comments carrying at least one report
    pub reported: usize,
    pub private: usize,
}

impl ThreadStats {
    pub fn from_comments<'a>(comments: impl IntoIterator<Item = &'a Comment>) -> Self {
        let mut stats = Self::default();
        for comment in comments {
            stats.total += 1;
            match comment.state() {
                CommentState::Deleted => {
                    stats.deleted += 1;
                    continue;
                }
                CommentState::Edited => stats.edited += 1,
                CommentState::Active => {}
            }
            stats.live += 1;
            if !comment.reports.is_empty() {
                stats.reported += 1;
            }
            if !comment.is_public() {
                stats.private += 1;
            }
        }
        stats
    }
}
