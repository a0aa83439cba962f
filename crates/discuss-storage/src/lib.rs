//! discuss-storage - Storage library for discuss
//!
//! This crate provides persistent storage implementations for comments.

mod comment_store;

pub use comment_store::FileSystemStorage;
