//! Comment indexing for fast lookup

use super::model::Comment;
use crate::types::{CommentId, NodeId, Target};
use std::collections::HashMap;

/// Adjacency index over comments.
///
/// Id lists keep insertion order, which is creation order for a store that
/// only ever appends.
#[derive(Debug, Clone, Default)]
pub struct CommentIndex {
    /// Replies by what they target
    by_target: HashMap<Target, Vec<CommentId>>,
    /// Every comment of a thread, by root node
    by_root: HashMap<NodeId, Vec<CommentId>>,
}

impl CommentIndex {
    /// Create a new empty index
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a comment to the index
    pub fn add(&mut self, comment: &Comment) {
        self.by_target
            .entry(comment.target.clone())
            .or_default()
            .push(comment.id.clone());

        self.by_root
            .entry(comment.root.clone())
            .or_default()
            .push(comment.id.clone());
    }

    /// Get replies to a target
    pub fn get_by_target(&self, target: &Target) -> Vec<CommentId> {
        self.by_target.get(target).cloned().unwrap_or_default()
    }

    /// Get every comment under a root node
    pub fn get_by_root(&self, root: &NodeId) -> Vec<CommentId> {
        self.by_root.get(root).cloned().unwrap_or_default()
    }

    /// Check if a target has any replies
    pub fn has_replies(&self, target: &Target) -> bool {
        self.by_target
            .get(target)
            .map(|ids| !ids.is_empty())
            .unwrap_or(false)
    }

    /// Clear the entire index
    pub fn clear(&mut self) {
        self.by_target.clear();
        self.by_root.clear();
    }

    /// Rebuild index from a collection of comments
    pub fn rebuild<C>(&mut self, comments: impl IntoIterator<Item = C>)
    where
        C: std::borrow::Borrow<Comment>,
    {
        self.clear();
        for comment in comments {
            self.add(comment.borrow());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::comment::builder::CommentBuilder;
    use crate::comment::model::User;

    fn create_test_comment(author: &str, target: Target) -> Comment {
        CommentBuilder::new(NodeId::new("n1"), User::new(author, author))
            .target(target)
            .content("Test")
            .build()
            .unwrap()
    }

    #[test]
    fn test_add_and_get_by_target() {
        let mut index = CommentIndex::new();
        let root = Target::Node(NodeId::new("n1"));
        let first = create_test_comment("alice", root.clone());
        let second = create_test_comment("bob", root.clone());

        index.add(&first);
        index.add(&second);

        assert_eq!(index.get_by_target(&root), vec![first.id.clone(), second.id.clone()]);
        assert!(index.has_replies(&root));
        assert!(!index.has_replies(&Target::Comment(first.id)));
    }

    #[test]
    fn test_get_by_root() {
        let mut index = CommentIndex::new();
        let root = Target::Node(NodeId::new("n1"));
        let parent = create_test_comment("alice", root);
        let reply = create_test_comment("alice", Target::Comment(parent.id.clone()));

        index.add(&parent);
        index.add(&reply);

        assert_eq!(index.get_by_root(&NodeId::new("n1")).len(), 2);
        assert!(index.get_by_root(&NodeId::new("n2")).is_empty());
    }

    #[test]
    fn test_rebuild() {
        let mut index = CommentIndex::new();
        let root = Target::Node(NodeId::new("n1"));
        let comments = vec![
            create_test_comment("alice", root.clone()),
            create_test_comment("bob", root.clone()),
        ];

        index.add(&comments[0]);
        index.rebuild(&comments);

        assert_eq!(index.get_by_target(&root).len(), 2);

        index.clear();
        assert!(index.by_target.is_empty());
        assert!(index.by_root.is_empty());
    }
}
