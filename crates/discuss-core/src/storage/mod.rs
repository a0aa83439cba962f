//! Comment persistence
//!
//! The thread store talks to persistence only through [`CommentStorage`]:
//! single-document save/load plus equality lookups on `target` and `root`.
//! Every `save` is expected to be atomic for that one document; nothing
//! coordinates writes across documents, so concurrent edits of the same
//! comment are last-write-wins.

mod memory;
pub mod migration;

pub use memory::MemoryStorage;
pub use migration::{CommentFile, CommentMigrator, CURRENT_SCHEMA_VERSION};

use crate::comment::Comment;
use crate::error::Result;
use crate::types::{CommentId, NodeId, Target};

/// Trait for comment storage implementations
pub trait CommentStorage: Send + Sync {
    /// Insert or replace a comment
    fn save(&self, comment: &Comment) -> Result<()>;

    /// Load a comment by ID, failing with `NotFound` if absent
    fn load(&self, id: &CommentId) -> Result<Comment>;

    /// Check if a comment exists
    fn exists(&self, id: &CommentId) -> bool;

    /// All comments targeting `target`, deleted or not, in creation order
    fn find_by_target(&self, target: &Target) -> Result<Vec<Comment>>;

    /// All comments of a thread, in creation order
    fn find_by_root(&self, root: &NodeId) -> Result<Vec<Comment>>;

    /// Non-deleted comments targeting `target`, in creation order
    fn find_live_by_target(&self, target: &Target) -> Result<Vec<Comment>> {
        Ok(self
            .find_by_target(target)?
            .into_iter()
            .filter(|c| c.state().is_live())
            .collect())
    }

    /// Whether any comment, deleted or not, replies to this one
    fn has_children(&self, id: &CommentId) -> Result<bool> {
        Ok(!self.find_by_target(&Target::Comment(id.clone()))?.is_empty())
    }
}
