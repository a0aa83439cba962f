//! Request bodies accepted by thread operations
//!
//! Every field is optional so that a missing field surfaces as an
//! `InvalidRequest` from the operation instead of a decode failure.

use serde::{Deserialize, Serialize};

/// Body of an add-comment request
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddCommentRequest {
    /// Id of the comment being replied to; absent for a top-level comment
    #[serde(default)]
    pub target: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
    /// "public" or "private"
    #[serde(default)]
    pub is_public: Option<String>,
}

impl AddCommentRequest {
    pub fn new(content: impl Into<String>, is_public: impl Into<String>) -> Self {
        Self {
            target: None,
            content: Some(content.into()),
            is_public: Some(is_public.into()),
        }
    }

    pub fn reply_to(mut self, target: impl Into<String>) -> Self {
        self.target = Some(target.into());
        self
    }
}

/// Body of an edit-comment request
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EditCommentRequest {
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub is_public: Option<String>,
}

impl EditCommentRequest {
    pub fn new(content: impl Into<String>, is_public: impl Into<String>) -> Self {
        Self {
            content: Some(content.into()),
            is_public: Some(is_public.into()),
        }
    }
}

/// Body of a report-abuse request
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReportAbuseRequest {
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub text: Option<String>,
}

impl ReportAbuseRequest {
    pub fn new(category: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            category: Some(category.into()),
            text: Some(text.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_request_from_json() {
        let req: AddCommentRequest =
            serde_json::from_str(r#"{"content": "hi", "isPublic": "public"}"#).unwrap();
        assert_eq!(req.content.as_deref(), Some("hi"));
        assert_eq!(req.is_public.as_deref(), Some("public"));
        assert!(req.target.is_none());
    }

    #[test]
    fn test_missing_fields_decode() {
        let req: EditCommentRequest = serde_json::from_str("{}").unwrap();
        assert!(req.content.is_none());
        assert!(req.is_public.is_none());

        let req: ReportAbuseRequest = serde_json::from_str(r#"{"category": "spam"}"#).unwrap();
        assert!(req.text.is_none());
    }
}
