//! Comment system module
//!
//! Comment entities, construction, indexing, sanitization and validation.

pub mod model;
pub mod index;
pub mod validator;
pub mod builder;
pub mod sanitize;

pub use model::*;
pub use index::CommentIndex;
pub use validator::CommentValidator;
pub use builder::CommentBuilder;
pub use sanitize::{Sanitizer, StripTags};
