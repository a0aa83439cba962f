//! Nodes, acting users and their capabilities
//!
//! Authorization itself lives outside this crate. Callers ask their
//! permission system once per request and hand the answers in as a
//! [`Capabilities`] set on the [`Actor`].

use crate::comment::{Comment, User};
use crate::types::{NodeId, UserId};
use serde::{Deserialize, Serialize};

/// Who may comment on a node, as configured on the host platform
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CommentLevel {
    /// Any user who can view the node
    Public,
    /// Contributors only
    Private,
}

/// The root collaboration entity comments attach to
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Node {
    pub id: NodeId,
    /// `None` disables commenting
    #[serde(default)]
    pub comment_level: Option<CommentLevel>,
    #[serde(default)]
    pub contributors: Vec<UserId>,
}

impl Node {
    /// A node with public commenting enabled
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: NodeId::new(id),
            comment_level: Some(CommentLevel::Public),
            contributors: Vec::new(),
        }
    }

    pub fn with_comment_level(mut self, level: Option<CommentLevel>) -> Self {
        self.comment_level = level;
        self
    }

    pub fn with_contributor(mut self, user: UserId) -> Self {
        if !self.contributors.contains(&user) {
            self.contributors.push(user);
        }
        self
    }

    pub fn commenting_enabled(&self) -> bool {
        self.comment_level.is_some()
    }

    pub fn is_contributor(&self, user: &UserId) -> bool {
        self.contributors.contains(user)
    }
}

/// Precomputed permission answers for one (user, node) pair
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Capabilities {
    pub can_view: bool,
    pub can_comment: bool,
    /// Edit rights on the node; grants sight of private comments
    pub can_edit: bool,
}

impl Capabilities {
    /// Read-only visitor
    pub fn viewer() -> Self {
        Self {
            can_view: true,
            ..Self::default()
        }
    }

    /// Visitor who may also comment
    pub fn commenter() -> Self {
        Self {
            can_view: true,
            can_comment: true,
            can_edit: false,
        }
    }

    /// Contributor with edit rights on the node
    pub fn moderator() -> Self {
        Self {
            can_view: true,
            can_comment: true,
            can_edit: true,
        }
    }
}

/// The user performing an operation
#[derive(Debug, Clone)]
pub struct Actor {
    /// `None` for anonymous visitors
    pub user: Option<User>,
    pub capabilities: Capabilities,
}

impl Actor {
    pub fn new(user: User, capabilities: Capabilities) -> Self {
        Self {
            user: Some(user),
            capabilities,
        }
    }

    pub fn anonymous(capabilities: Capabilities) -> Self {
        Self {
            user: None,
            capabilities,
        }
    }

    pub fn user_id(&self) -> Option<&UserId> {
        self.user.as_ref().map(|u| &u.id)
    }

    /// Public comments are visible to anyone; private ones need edit rights
    pub fn can_view_comment(&self, comment: &Comment) -> bool {
        comment.is_public() || self.capabilities.can_edit
    }

    pub fn is_author_of(&self, comment: &Comment) -> bool {
        self.user_id().is_some_and(|id| comment.is_authored_by(id))
    }
}
