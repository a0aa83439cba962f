//! discuss-core - Core library for discuss
//!
//! This crate provides threaded, moderated comments attached to root
//! collaboration nodes: comment entities, persistence abstractions, the
//! thread store with its visibility and ownership rules, and the JSON views
//! handed back to a web layer.

pub mod error;
pub mod types;
pub mod config;
pub mod access;
pub mod avatar;
pub mod comment;
pub mod storage;
pub mod thread;
pub mod view;
pub mod api;

pub use error::{DiscussError, Result};
pub use types::*;
