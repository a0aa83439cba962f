//! In-memory comment storage

use super::CommentStorage;
use crate::comment::{Comment, CommentIndex};
use crate::error::{DiscussError, Result};
use crate::types::{CommentId, NodeId, Target};
use std::collections::HashMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

#[derive(Default)]
struct Inner {
    comments: HashMap<CommentId, Comment>,
    index: CommentIndex,
}

/// In-memory comment storage, used by tests and embedders
#[derive(Default)]
pub struct MemoryStorage {
    inner: RwLock<Inner>,
}

impl MemoryStorage {
    /// Create a new in-memory storage
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Inner>> {
        self.inner
            .read()
            .map_err(|_| DiscussError::Storage("comment storage lock poisoned".to_string()))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Inner>> {
        self.inner
            .write()
            .map_err(|_| DiscussError::Storage("comment storage lock poisoned".to_string()))
    }

    fn collect(inner: &Inner, ids: Vec<CommentId>) -> Vec<Comment> {
        ids.iter()
            .filter_map(|id| inner.comments.get(id))
            .cloned()
            .collect()
    }
}

impl CommentStorage for MemoryStorage {
    fn save(&self, comment: &Comment) -> Result<()> {
        let mut inner = self.write()?;
        // Target, root and author are immutable, so only new comments touch the index
        if !inner.comments.contains_key(&comment.id) {
            inner.index.add(comment);
        }
        inner.comments.insert(comment.id.clone(), comment.clone());
        Ok(())
    }

    fn load(&self, id: &CommentId) -> Result<Comment> {
        self.read()?
            .comments
            .get(id)
            .cloned()
            .ok_or_else(|| DiscussError::NotFound(format!("comment {}", id)))
    }

    fn exists(&self, id: &CommentId) -> bool {
        self.read()
            .map(|inner| inner.comments.contains_key(id))
            .unwrap_or(false)
    }

    fn find_by_target(&self, target: &Target) -> Result<Vec<Comment>> {
        let inner = self.read()?;
        let ids = inner.index.get_by_target(target);
        Ok(Self::collect(&inner, ids))
    }

    fn find_by_root(&self, root: &NodeId) -> Result<Vec<Comment>> {
        let inner = self.read()?;
        let ids = inner.index.get_by_root(root);
        Ok(Self::collect(&inner, ids))
    }

    fn has_children(&self, id: &CommentId) -> Result<bool> {
        Ok(self.read()?.index.has_replies(&Target::Comment(id.clone())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::comment::{CommentBuilder, User};

    fn create_test_comment(target: Target) -> Comment {
        CommentBuilder::new(NodeId::new("n1"), User::new("alice", "Alice"))
            .target(target)
            .content("Test")
            .build()
            .unwrap()
    }

    #[test]
    fn test_memory_storage_save_load() {
        let storage = MemoryStorage::new();
        let comment = create_test_comment(Target::Node(NodeId::new("n1")));
        let id = comment.id.clone();

        storage.save(&comment).unwrap();
        let loaded = storage.load(&id).unwrap();

        assert_eq!(loaded.id, comment.id);
        assert!(storage.exists(&id));
        assert_eq!(storage.find_by_root(&NodeId::new("n1")).unwrap().len(), 1);
    }

    #[test]
    fn test_memory_storage_load_missing() {
        let storage = MemoryStorage::new();
        let err = storage.load(&CommentId::new()).unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_resave_does_not_duplicate() {
        let storage = MemoryStorage::new();
        let root = Target::Node(NodeId::new("n1"));
        let mut comment = create_test_comment(root.clone());

        storage.save(&comment).unwrap();
        comment.soft_delete();
        storage.save(&comment).unwrap();

        assert_eq!(storage.find_by_target(&root).unwrap().len(), 1);
        assert!(storage.find_live_by_target(&root).unwrap().is_empty());
        assert_eq!(storage.find_by_root(&NodeId::new("n1")).unwrap().len(), 1);
    }

    #[test]
    fn test_find_by_target_keeps_creation_order() {
        let storage = MemoryStorage::new();
        let root = Target::Node(NodeId::new("n1"));
        let ids: Vec<_> = (0..5)
            .map(|_| {
                let c = create_test_comment(root.clone());
                storage.save(&c).unwrap();
                c.id
            })
            .collect();

        let found: Vec<_> = storage
            .find_by_target(&root)
            .unwrap()
            .into_iter()
            .map(|c| c.id)
            .collect();
        assert_eq!(found, ids);
    }

    #[test]
    fn test_has_children() {
        let storage = MemoryStorage::new();
        let parent = create_test_comment(Target::Node(NodeId::new("n1")));
        let reply = create_test_comment(Target::Comment(parent.id.clone()));

        storage.save(&parent).unwrap();
        assert!(!storage.has_children(&parent.id).unwrap());

        storage.save(&reply).unwrap();
        assert!(storage.has_children(&parent.id).unwrap());
    }

    #[test]
    fn test_poisoned_lock_is_storage_error() {
        let storage = std::sync::Arc::new(MemoryStorage::new());
        let shared = std::sync::Arc::clone(&storage);
        let _ = std::thread::spawn(move || {
            let _guard = shared.inner.write().unwrap();
            panic!("writer died holding the lock");
        })
        .join();

        let err = storage.load(&CommentId::new()).unwrap_err();
        assert!(matches!(err, DiscussError::Storage(_)));
        assert_eq!(err.status_code(), 500);
    }
}
