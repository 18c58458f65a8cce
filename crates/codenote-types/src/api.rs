//! Request and response bodies for the backend endpoints.

use serde::{Deserialize, Serialize};

use crate::types::{CommentLevel, ContentEntry, Language, Repository, User};

/// Body of `POST /annotate`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnnotateRequest {
    pub code: String,
    pub language: Language,
    pub comment_level: CommentLevel,
}

/// Body of `POST /repos/annotate`. The file is resolved server-side.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepositoryAnnotateRequest {
    pub owner: String,
    pub repo: String,
    pub path: String,
    pub language: Language,
    pub comment_level: CommentLevel,
}

/// Response of both annotate endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnnotateResponse {
    pub annotated_code: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserResponse {
    pub user: User,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepositoriesResponse {
    pub repositories: Vec<Repository>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentsResponse {
    pub contents: Vec<ContentEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
}

/// Body carried by non-success responses.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub detail: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repository_annotate_request_wire_shape() {
        let request = RepositoryAnnotateRequest {
            owner: "octocat".to_string(),
            repo: "hello".to_string(),
            path: "src/main.go".to_string(),
            language: Language::Go,
            comment_level: CommentLevel::Minimal,
        };

        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            serde_json::json!({
                "owner": "octocat",
                "repo": "hello",
                "path": "src/main.go",
                "language": "go",
                "comment_level": "minimal"
            })
        );
    }

    #[test]
    fn test_error_body_without_detail() {
        let body: ErrorBody = serde_json::from_str("{}").unwrap();
        assert_eq!(body.detail, None);

        let body: ErrorBody = serde_json::from_str(r#"{"detail":"quota exceeded"}"#).unwrap();
        assert_eq!(body.detail.as_deref(), Some("quota exceeded"));
    }
}
