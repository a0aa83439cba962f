//! Threaded discussions
//!
//! [`ThreadStore`] is the entry point for every comment operation: it
//! resolves targets, enforces ownership and visibility, and turns stored
//! comments into the views handed back to callers.
//!
//! # Example
//!
//! ```ignore
//! use discuss_core::access::{Actor, Capabilities, Node};
//! use discuss_core::comment::User;
//! use discuss_core::storage::MemoryStorage;
//! use discuss_core::thread::{AddCommentRequest, ThreadStore};
//!
//! let store = ThreadStore::new(MemoryStorage::new());
//! let node = Node::new("abc12");
//! let alice = Actor::new(User::new("alice", "Alice"), Capabilities::commenter());
//!
//! let comment = store.add_comment(&node, &alice, &AddCommentRequest::new("hi", "public"))?;
//! let listed = store.list_comments(&node, &alice, None)?;
//! ```

mod request;
mod store;

pub use request::{AddCommentRequest, EditCommentRequest, ReportAbuseRequest};
pub use store::ThreadStore;
