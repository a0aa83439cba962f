//! JSON request/response layer for the comment endpoints
//!
//! Maps [`ThreadStore`] results onto the status codes and body shapes the
//! web layer returns. Routing and authentication stay with the caller.

use crate::access::{Actor, Node};
use crate::error::DiscussError;
use crate::thread::{AddCommentRequest, EditCommentRequest, ReportAbuseRequest, ThreadStore};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::debug;

/// One inbound comment API call
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum ApiRequest {
    Discussion {
        #[serde(default)]
        target: Option<String>,
    },
    AddComment(AddCommentRequest),
    ListComments {
        #[serde(default)]
        target: Option<String>,
    },
    EditComment {
        cid: String,
        #[serde(flatten)]
        body: EditCommentRequest,
    },
    DeleteComment {
        cid: String,
    },
    ReportAbuse {
        cid: String,
        #[serde(flatten)]
        body: ReportAbuseRequest,
    },
}

/// Status code plus JSON body
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiResponse {
    pub status: u16,
    pub body: Value,
}

impl ApiResponse {
    pub fn ok(body: Value) -> Self {
        Self { status: 200, body }
    }

    pub fn created(body: Value) -> Self {
        Self { status: 201, body }
    }

    pub fn from_error(err: &DiscussError) -> Self {
        let status = err.status_code();
        Self {
            status,
            body: json!({ "code": status, "message": err.to_string() }),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Run one request against the store
pub fn handle(
    store: &ThreadStore,
    node: &Node,
    actor: &Actor,
    request: &ApiRequest,
) -> ApiResponse {
    let result = dispatch(store, node, actor, request);
    match result {
        Ok(response) => response,
        Err(err) => {
            debug!("Comment API call failed: {}", err);
            ApiResponse::from_error(&err)
        }
    }
}

/// Decode a JSON request body and run it
pub fn handle_json(store: &ThreadStore, node: &Node, actor: &Actor, body: &str) -> ApiResponse {
    match serde_json::from_str::<ApiRequest>(body) {
        Ok(request) => handle(store, node, actor, &request),
        Err(e) => ApiResponse::from_error(&DiscussError::InvalidRequest(format!(
            "Malformed request body: {}",
            e
        ))),
    }
}

fn dispatch(
    store: &ThreadStore,
    node: &Node,
    actor: &Actor,
    request: &ApiRequest,
) -> crate::Result<ApiResponse> {
    let response = match request {
        ApiRequest::Discussion { target } => {
            let discussion = store.discussion(node, actor, target.as_deref())?;
            ApiResponse::ok(json!({ "discussion": discussion }))
        }
        ApiRequest::AddComment(body) => {
            let comment = store.add_comment(node, actor, body)?;
            let view = store.serialize(&comment, actor)?;
            ApiResponse::created(json!({ "comment": view }))
        }
        ApiRequest::ListComments { target } => {
            let comments = store.list_comments(node, actor, target.as_deref())?;
            ApiResponse::ok(json!({ "comments": comments }))
        }
        ApiRequest::EditComment { cid, body } => {
            let view = store.edit_comment(node, actor, cid, body)?;
            ApiResponse::ok(serde_json::to_value(view)?)
        }
        ApiRequest::DeleteComment { cid } => {
            store.delete_comment(node, actor, cid)?;
            ApiResponse::ok(json!({}))
        }
        ApiRequest::ReportAbuse { cid, body } => {
            store.report_abuse(node, actor, cid, body)?;
            ApiResponse::ok(json!({}))
        }
    };
    Ok(response)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::access::Capabilities;
    use crate::comment::User;
    use crate::storage::MemoryStorage;
    use pretty_assertions::assert_eq;

    fn setup() -> (ThreadStore, Node, Actor) {
        let store = ThreadStore::new(MemoryStorage::new());
        let node = Node::new("n1");
        let alice = Actor::new(User::new("alice", "Alice"), Capabilities::commenter());
        (store, node, alice)
    }

    fn add(store: &ThreadStore, node: &Node, actor: &Actor) -> String {
        let response = handle_json(
            store,
            node,
            actor,
            r#"{"op": "add_comment", "content": "hi", "isPublic": "public"}"#,
        );
        assert_eq!(response.status, 201);
        response.body["comment"]["id"].as_str().unwrap().to_string()
    }

    #[test]
    fn test_add_and_list() {
        let (store, node, alice) = setup();
        let cid = add(&store, &node, &alice);

        let response = handle_json(&store, &node, &alice, r#"{"op": "list_comments"}"#);
        assert_eq!(response.status, 200);
        assert_eq!(response.body["comments"][0]["id"], cid.as_str());
        assert_eq!(response.body["comments"][0]["canEdit"], true);
    }

    #[test]
    fn test_add_errors() {
        let (store, node, alice) = setup();

        let body = r#"{"op": "add_comment", "isPublic": "public"}"#;
        let missing = handle_json(&store, &node, &alice, body);
        assert_eq!(missing.status, 400);
        assert_eq!(missing.body["code"], 400);

        let viewer = Actor::new(User::new("vic", "Vic"), Capabilities::viewer());
        let forbidden = handle_json(
            &store,
            &node,
            &viewer,
            r#"{"op": "add_comment", "content": "hi", "isPublic": "public"}"#,
        );
        assert_eq!(forbidden.status, 403);
    }

    #[test]
    fn test_edit_delete_report() {
        let (store, node, alice) = setup();
        let cid = add(&store, &node, &alice);

        let edit = handle(
            &store,
            &node,
            &alice,
            &ApiRequest::EditComment {
                cid: cid.clone(),
                body: EditCommentRequest::new("edited", "private"),
            },
        );
        assert_eq!(edit.status, 200);
        assert_eq!(edit.body["content"], "edited");
        assert_eq!(edit.body["isPublic"], "private");

        let report = handle_json(
            &store,
            &node,
            &alice,
            &format!(r#"{{"op": "report_abuse", "cid": "{}", "category": "spam"}}"#, cid),
        );
        assert_eq!(report, ApiResponse::ok(json!({})));

        let no_category = handle_json(
            &store,
            &node,
            &alice,
            &format!(r#"{{"op": "report_abuse", "cid": "{}"}}"#, cid),
        );
        assert_eq!(no_category.status, 400);

        let delete = handle(&store, &node, &alice, &ApiRequest::DeleteComment { cid: cid.clone() });
        assert!(delete.is_success());
        assert_eq!(delete.body, json!({}));

        let missing = handle(&store, &node, &alice, &ApiRequest::DeleteComment { cid: "x".into() });
        assert_eq!(missing.status, 400);
    }

    #[test]
    fn test_discussion_shape() {
        let (store, node, alice) = setup();
        add(&store, &node, &alice);

        let response = handle(&store, &node, &alice, &ApiRequest::Discussion { target: None });
        assert_eq!(response.status, 200);
        let entry = &response.body["discussion"][0];
        assert_eq!(entry["fullname"], "Alice");
        assert_eq!(entry["isContributor"], false);
        assert!(entry["gravatarUrl"].as_str().unwrap().contains("gravatar"));
    }

    #[test]
    fn test_malformed_body() {
        let (store, node, alice) = setup();
        assert_eq!(handle_json(&store, &node, &alice, "not json").status, 400);
        assert_eq!(handle_json(&store, &node, &alice, r#"{"op": "launch"}"#).status, 400);
    }
}
