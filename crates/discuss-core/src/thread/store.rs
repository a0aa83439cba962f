//! Thread store: comment operations over a storage backend

use super::request::{AddCommentRequest, EditCommentRequest, ReportAbuseRequest};
use crate::access::{Actor, Node};
use crate::comment::{
    AbuseReport, Comment, CommentBuilder, CommentValidator, Sanitizer, StripTags, User,
};
use crate::config::Config;
use crate::error::{DiscussError, Result};
use crate::storage::CommentStorage;
use crate::types::{CommentId, Target, UserId};
use crate::view::{DiscussionEntry, SerializedComment, ThreadStats, ViewOptions};
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Default cap on reply depth visited by discussion collection
pub const DEFAULT_MAX_DEPTH: usize = 256;

/// Comment operations for threads rooted at nodes
pub struct ThreadStore {
    /// Storage backend
    storage: Arc<dyn CommentStorage>,
    sanitizer: Box<dyn Sanitizer>,
    validator: CommentValidator,
    view: ViewOptions,
    max_depth: usize,
}

impl ThreadStore {
    /// Create a thread store with default settings over the given storage
    pub fn new(storage: impl CommentStorage + 'static) -> Self {
        Self::with_storage(Arc::new(storage))
    }

    /// Create a thread store over shared storage
    pub fn with_storage(storage: Arc<dyn CommentStorage>) -> Self {
        Self {
            storage,
            sanitizer: Box::new(StripTags),
            validator: CommentValidator::new(),
            view: ViewOptions::default(),
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    /// Apply limits and view settings from a validated configuration
    pub fn with_config(mut self, config: &Config) -> Result<Self> {
        config.validate()?;
        self.validator = CommentValidator::from_config(config);
        self.view = ViewOptions::from_config(config);
        self.max_depth = config.threads.max_depth;
        Ok(self)
    }

    /// Replace the content sanitizer
    pub fn with_sanitizer(mut self, sanitizer: impl Sanitizer + 'static) -> Self {
        self.sanitizer = Box::new(sanitizer);
        self
    }

    /// Get access to the underlying storage
    pub fn storage(&self) -> &dyn CommentStorage {
        self.storage.as_ref()
    }

    /// Resolve what a request refers to.
    ///
    /// No reference means the node itself. Anything else must name a comment
    /// of this node's thread, deleted or not.
    pub fn resolve_target(&self, root: &Node, reference: Option<&str>) -> Result<Target> {
        let reference = match reference.map(str::trim) {
            None | Some("") => return Ok(Target::Node(root.id.clone())),
            Some(r) if r == root.id.as_str() => return Ok(Target::Node(root.id.clone())),
            Some(r) => r,
        };

        let comment = self.load_comment(root, reference)?;
        Ok(Target::Comment(comment.id))
    }

    /// Distinct authors of non-deleted comments reachable from `target`,
    /// in order of first encounter.
    ///
    /// Deleted comments contribute no author but their replies are still
    /// walked. Replies deeper than the configured depth are skipped.
    pub fn collect_discussion(&self, target: &Target) -> Result<Vec<User>> {
        let mut users = Vec::new();
        let mut seen_users: HashSet<UserId> = HashSet::new();
        let mut visited: HashSet<CommentId> = HashSet::new();
        let mut truncated = false;

        let mut stack: Vec<(Comment, usize)> = self
            .storage
            .find_by_target(target)?
            .into_iter()
            .rev()
            .map(|c| (c, 1))
            .collect();

        while let Some((comment, depth)) = stack.pop() {
            if !visited.insert(comment.id.clone()) {
                continue;
            }

            if !comment.is_deleted && seen_users.insert(comment.author.id.clone()) {
                users.push(comment.author.clone());
            }

            let replies = self
                .storage
                .find_by_target(&Target::Comment(comment.id.clone()))?;
            if depth >= self.max_depth {
                truncated |= !replies.is_empty();
                continue;
            }
            stack.extend(replies.into_iter().rev().map(|c| (c, depth + 1)));
        }

        if truncated {
            warn!(
                "Discussion under {} exceeds depth {}; deeper replies skipped",
                target, self.max_depth
            );
        }

        Ok(users)
    }

    /// Post a new comment on the node or as a reply
    pub fn add_comment(
        &self,
        root: &Node,
        actor: &Actor,
        request: &AddCommentRequest,
    ) -> Result<Comment> {
        if !root.commenting_enabled() {
            return Err(DiscussError::InvalidRequest(format!(
                "Commenting is disabled on node {}",
                root.id
            )));
        }

        let author = match &actor.user {
            Some(user) if actor.capabilities.can_comment => user,
            Some(user) => {
                return Err(DiscussError::Forbidden(format!(
                    "User {} cannot comment on node {}",
                    user.id, root.id
                )))
            }
            None => {
                return Err(DiscussError::Forbidden(
                    "Login required to comment".to_string(),
                ))
            }
        };

        let target = self
            .resolve_target(root, request.target.as_deref())
            .map_err(|e| match e {
                DiscussError::NotFound(what) => {
                    DiscussError::InvalidRequest(format!("Unknown target: {}", what))
                }
                other => other,
            })?;
        let content = self.clean_content(request.content.as_deref())?;
        let visibility = self
            .validator
            .parse_visibility(request.is_public.as_deref())?;

        let comment = CommentBuilder::new(root.id.clone(), author.clone())
            .target(target)
            .content(content)
            .visibility(visibility)
            .build()?;
        self.storage.save(&comment)?;

        info!(
            "User {} added comment {} on {}",
            author.id, comment.id, comment.target
        );
        Ok(comment)
    }

    /// Visible, non-deleted replies to a target.
    ///
    /// Actors who cannot comment on the node get an empty list rather than
    /// an error, so private discussions are not revealed.
    pub fn list_comments(
        &self,
        root: &Node,
        actor: &Actor,
        target_ref: Option<&str>,
    ) -> Result<Vec<SerializedComment>> {
        if !actor.capabilities.can_comment {
            debug!("Actor cannot comment on {}; listing nothing", root.id);
            return Ok(Vec::new());
        }

        let target = self.resolve_target(root, target_ref)?;
        self.storage
            .find_live_by_target(&target)?
            .iter()
            .filter(|c| actor.can_view_comment(c))
            .map(|c| self.serialize(c, actor))
            .collect()
    }

    /// Change content and visibility of one's own comment
    pub fn edit_comment(
        &self,
        root: &Node,
        actor: &Actor,
        comment_ref: &str,
        request: &EditCommentRequest,
    ) -> Result<SerializedComment> {
        let mut comment = self.load_live_comment(root, comment_ref)?;
        Self::ensure_author(actor, &comment)?;

        let content = self.clean_content(request.content.as_deref())?;
        let visibility = self
            .validator
            .parse_visibility(request.is_public.as_deref())?;

        comment.edit(content, visibility);
        self.storage.save(&comment)?;

        debug!("Edited comment {}", comment.id);
        self.serialize(&comment, actor)
    }

    /// Soft-delete one's own comment; replies stay in place
    pub fn delete_comment(&self, root: &Node, actor: &Actor, comment_ref: &str) -> Result<()> {
        let mut comment = self.load_comment(root, comment_ref)?;
        Self::ensure_author(actor, &comment)?;

        if comment.is_deleted {
            debug!("Comment {} already deleted", comment.id);
            return Ok(());
        }

        comment.soft_delete();
        self.storage.save(&comment)?;

        info!("Deleted comment {}", comment.id);
        Ok(())
    }

    /// File or replace the actor's abuse report on a comment.
    ///
    /// Authors may report their own comments.
    pub fn report_abuse(
        &self,
        root: &Node,
        actor: &Actor,
        comment_ref: &str,
        request: &ReportAbuseRequest,
    ) -> Result<()> {
        let mut comment = self.load_live_comment(root, comment_ref)?;

        let reporter = match &actor.user {
            Some(user) if actor.capabilities.can_view && actor.capabilities.can_comment => user,
            Some(user) => {
                return Err(DiscussError::Forbidden(format!(
                    "User {} cannot report comments on node {}",
                    user.id, root.id
                )))
            }
            None => {
                return Err(DiscussError::Forbidden(
                    "Login required to report comments".to_string(),
                ))
            }
        };

        let category = self
            .validator
            .validate_category(request.category.as_deref())?;
        let text = request
            .text
            .as_deref()
            .map(|t| self.sanitizer.sanitize(t))
            .unwrap_or_default();

        comment.report_abuse(&reporter.id, AbuseReport::new(category, text));
        self.storage.save(&comment)?;

        info!(
            "User {} reported comment {} as {}",
            reporter.id, comment.id, category
        );
        Ok(())
    }

    /// Participants of the discussion under a target
    pub fn discussion(
        &self,
        root: &Node,
        actor: &Actor,
        target_ref: Option<&str>,
    ) -> Result<Vec<DiscussionEntry>> {
        if !actor.capabilities.can_view {
            debug!("Actor cannot view {}; no discussion", root.id);
            return Ok(Vec::new());
        }

        let target = self.resolve_target(root, target_ref)?;
        Ok(self
            .collect_discussion(&target)?
            .iter()
            .map(|user| DiscussionEntry::new(user, root, &self.view))
            .collect())
    }

    /// Comment counts for the node's whole thread
    pub fn thread_stats(&self, root: &Node) -> Result<ThreadStats> {
        let comments = self.storage.find_by_root(&root.id)?;
        Ok(ThreadStats::from_comments(&comments))
    }

    /// Serialize one comment for an actor
    pub fn serialize(&self, comment: &Comment, actor: &Actor) -> Result<SerializedComment> {
        let has_children = self.storage.has_children(&comment.id)?;
        SerializedComment::new(comment, actor, has_children, &self.view)
    }

    fn clean_content(&self, content: Option<&str>) -> Result<String> {
        let content = content.ok_or_else(|| {
            DiscussError::InvalidRequest("Comment content is required".to_string())
        })?;
        let content = self.sanitizer.sanitize(content);
        self.validator.validate_content(&content)?;
        Ok(content)
    }

    /// Load a comment of this node's thread, deleted or not
    fn load_comment(&self, root: &Node, comment_ref: &str) -> Result<Comment> {
        let id = CommentId::from_string(comment_ref.trim())
            .map_err(|_| DiscussError::NotFound(format!("comment {}", comment_ref)))?;
        let comment = self.storage.load(&id)?;

        if comment.root != root.id {
            return Err(DiscussError::NotFound(format!(
                "comment {} on node {}",
                id, root.id
            )));
        }
        Ok(comment)
    }

    fn load_live_comment(&self, root: &Node, comment_ref: &str) -> Result<Comment> {
        let comment = self.load_comment(root, comment_ref)?;
        if !comment.state().is_live() {
            return Err(DiscussError::NotFound(format!("comment {}", comment.id)));
        }
        Ok(comment)
    }

    fn ensure_author(actor: &Actor, comment: &Comment) -> Result<()> {
        if !actor.capabilities.can_view || !actor.is_author_of(comment) {
            return Err(DiscussError::Forbidden(format!(
                "Only the author may modify comment {}",
                comment.id
            )));
        }
        Ok(())
    }
}
