use std::time::Duration;

use async_trait::async_trait;
use codenote_types::{
    AnnotateRequest, AnnotateResponse, ContentEntry, ContentsResponse, ErrorBody,
    HealthResponse, Repository, RepositoriesResponse, RepositoryAnnotateRequest, User,
    UserResponse,
};
use reqwest::header::COOKIE;
use reqwest::RequestBuilder;
use serde::de::DeserializeOwned;

use crate::{BackendClient, ClientError, AUTH_COOKIE};

/// HTTP client for communicating with a remote codenote backend
pub struct HttpBackendClient {
    base_url: String,
    client: reqwest::Client,
    timeout: Duration,
}

impl HttpBackendClient {
    pub fn new(base_url: String) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: reqwest::Client::new(),
            timeout: Duration::from_secs(60),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn authorized(&self, builder: RequestBuilder, token: &str) -> RequestBuilder {
        builder
            .header(COOKIE, format!("{AUTH_COOKIE}={token}"))
            .timeout(self.timeout)
    }

    async fn send(&self, builder: RequestBuilder, what: &str) -> Result<reqwest::Response, ClientError> {
        let response = builder.send().await.map_err(|e| {
            log::error!("{} failed to reach backend: {}", what, e);
            ClientError::from(e)
        })?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let detail = match response.bytes().await {
            Ok(body) => serde_json::from_slice::<ErrorBody>(&body)
                .ok()
                .and_then(|b| b.detail),
            Err(_) => None,
        };
        log::warn!(
            "{} returned {}: {}",
            what,
            status,
            detail.as_deref().unwrap_or("no detail")
        );
        Err(ClientError::Server {
            status: status.as_u16(),
            detail,
        })
    }

    async fn decode<T: DeserializeOwned>(
        response: reqwest::Response,
        what: &str,
    ) -> Result<T, ClientError> {
        let body = response.bytes().await?;
        serde_json::from_slice::<T>(&body).map_err(|e| {
            log::error!("Failed to parse {} response: {}", what, e);
            log::debug!("Response parsing error details: {:?}", e);
            ClientError::Malformed(e.to_string())
        })
    }
}

#[async_trait]
impl BackendClient for HttpBackendClient {
    fn login_url(&self) -> String {
        self.url("/auth/github")
    }

    async fn health_check(&self) -> Result<(), ClientError> {
        let builder = self.client.get(self.url("/health")).timeout(self.timeout);
        let response = self.send(builder, "health check").await?;
        let health: HealthResponse = Self::decode(response, "health check").await?;
        log::debug!("Backend health status: {}", health.status);
        Ok(())
    }

    async fn current_user(&self, token: &str) -> Result<User, ClientError> {
        let builder = self.authorized(self.client.get(self.url("/auth/user")), token);
        let response = self.send(builder, "current user").await?;
        let body: UserResponse = Self::decode(response, "current user").await?;
        Ok(body.user)
    }

    async fn list_repositories(&self, token: &str) -> Result<Vec<Repository>, ClientError> {
        let builder = self.authorized(self.client.get(self.url("/repos")), token);
        let response = self.send(builder, "list repositories").await?;
        let body: RepositoriesResponse = Self::decode(response, "list repositories").await?;
        Ok(body.repositories)
    }

    async fn list_contents(
        &self,
        token: &str,
        owner: &str,
        repo: &str,
        path: &str,
    ) -> Result<Vec<ContentEntry>, ClientError> {
        let url = self.url(&format!(
            "/repos/{}/{}/contents",
            urlencoding::encode(owner),
            urlencoding::encode(repo)
        ));
        let builder = self.authorized(self.client.get(url).query(&[("path", path)]), token);
        let response = self.send(builder, "list contents").await?;
        let body: ContentsResponse = Self::decode(response, "list contents").await?;
        Ok(body.contents)
    }

    async fn annotate(&self, request: &AnnotateRequest) -> Result<String, ClientError> {
        let builder = self
            .client
            .post(self.url("/annotate"))
            .timeout(self.timeout)
            .json(request);
        let response = self.send(builder, "annotate").await?;
        let body: AnnotateResponse = Self::decode(response, "annotate").await?;
        Ok(body.annotated_code)
    }

    async fn annotate_repository_file(
        &self,
        token: &str,
        request: &RepositoryAnnotateRequest,
    ) -> Result<String, ClientError> {
        let builder = self.authorized(self.client.post(self.url("/repos/annotate")), token);
        let response = self
            .send(builder.json(request), "annotate repository file")
            .await?;
        let body: AnnotateResponse = Self::decode(response, "annotate repository file").await?;
        Ok(body.annotated_code)
    }

    async fn logout(&self, token: &str) -> Result<(), ClientError> {
        let builder = self.authorized(self.client.post(self.url("/auth/logout")), token);
        self.send(builder, "logout").await?;
        log::debug!("Server-side session invalidated");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use codenote_types::{CommentLevel, EntryKind, Language};
    use mockito::Matcher;
    use serde_json::json;

    #[tokio::test]
    async fn test_annotate_posts_code_language_and_level() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/annotate")
            .match_body(Matcher::Json(json!({
                "code": "print(1)",
                "language": "python",
                "comment_level": "standard"
            })))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(json!({"annotated_code": "# prints 1\nprint(1)"}).to_string())
            .create_async()
            .await;

        let client = HttpBackendClient::new(server.url());
        let annotated = client
            .annotate(&AnnotateRequest {
                code: "print(1)".to_string(),
                language: Language::Python,
                comment_level: CommentLevel::Standard,
            })
            .await
            .unwrap();

        assert_eq!(annotated, "# prints 1\nprint(1)");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_server_error_carries_detail() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/annotate")
            .with_status(500)
            .with_body(json!({"detail": "quota exceeded"}).to_string())
            .create_async()
            .await;

        let client = HttpBackendClient::new(server.url());
        let err = client
            .annotate(&AnnotateRequest {
                code: "x = 1".to_string(),
                language: Language::Python,
                comment_level: CommentLevel::Minimal,
            })
            .await
            .unwrap_err();

        assert_eq!(
            err,
            ClientError::Server {
                status: 500,
                detail: Some("quota exceeded".to_string())
            }
        );
    }

    #[tokio::test]
    async fn test_server_error_without_body() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/repos")
            .with_status(503)
            .with_body("upstream down")
            .create_async()
            .await;

        let client = HttpBackendClient::new(server.url());
        let err = client.list_repositories("tok").await.unwrap_err();

        assert_eq!(err.detail(), "HTTP error! status: 503");
    }

    #[tokio::test]
    async fn test_success_with_missing_field_is_malformed() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/annotate")
            .with_status(200)
            .with_body(json!({"result": "nope"}).to_string())
            .create_async()
            .await;

        let client = HttpBackendClient::new(server.url());
        let err = client
            .annotate(&AnnotateRequest {
                code: "x".to_string(),
                language: Language::Go,
                comment_level: CommentLevel::Detailed,
            })
            .await
            .unwrap_err();

        assert!(matches!(err, ClientError::Malformed(_)));
    }

    #[tokio::test]
    async fn test_authenticated_calls_send_cookie() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/auth/user")
            .match_header("cookie", "authorization=secret-token")
            .with_status(200)
            .with_body(
                json!({"user": {"login": "octocat", "avatar_url": "https://avatars/1"}})
                    .to_string(),
            )
            .create_async()
            .await;

        let client = HttpBackendClient::new(server.url());
        let user = client.current_user("secret-token").await.unwrap();

        assert_eq!(user.login, "octocat");
        assert_eq!(user.avatar_url, "https://avatars/1");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_list_contents_passes_path_query() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/repos/octocat/hello/contents")
            .match_query(Matcher::UrlEncoded("path".into(), "src/lib".into()))
            .with_status(200)
            .with_body(
                json!({"contents": [
                    {"name": "mod.rs", "path": "src/lib/mod.rs", "type": "file", "size": 10}
                ]})
                .to_string(),
            )
            .create_async()
            .await;

        let client = HttpBackendClient::new(server.url());
        let entries = client
            .list_contents("tok", "octocat", "hello", "src/lib")
            .await
            .unwrap();

        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].kind, EntryKind::File);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_annotate_repository_file_sends_pointer_only() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/repos/annotate")
            .match_header("cookie", "authorization=tok")
            .match_body(Matcher::Json(json!({
                "owner": "octocat",
                "repo": "hello",
                "path": "src/main.go",
                "language": "go",
                "comment_level": "detailed"
            })))
            .with_status(200)
            .with_body(json!({"annotated_code": "// main\npackage main"}).to_string())
            .create_async()
            .await;

        let client = HttpBackendClient::new(server.url());
        let annotated = client
            .annotate_repository_file(
                "tok",
                &RepositoryAnnotateRequest {
                    owner: "octocat".to_string(),
                    repo: "hello".to_string(),
                    path: "src/main.go".to_string(),
                    language: Language::Go,
                    comment_level: CommentLevel::Detailed,
                },
            )
            .await
            .unwrap();

        assert_eq!(annotated, "// main\npackage main");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_unreachable_backend_is_transport_error() {
        let client = HttpBackendClient::new("http://127.0.0.1:9".to_string())
            .with_timeout(Duration::from_millis(500));

        let err = client.health_check().await.unwrap_err();

        assert!(matches!(err, ClientError::Transport(_)));
    }

    #[test]
    fn test_login_url_trims_trailing_slash() {
        let client = HttpBackendClient::new("http://localhost:8000/".to_string());
        assert_eq!(client.login_url(), "http://localhost:8000/auth/github");
    }
}
