//! Client SDK for the codenote annotation backend
//!
//! The [`BackendClient`] trait is the single seam between the application core
//! and the network. The core only ever talks to a `Box<dyn BackendClient>`, so
//! tests substitute an in-memory fake while the binary uses
//! [`http_client::HttpBackendClient`].
//!
//! Authenticated calls take the session token explicitly. The client holds no
//! session state of its own.

use std::time::Duration;

use async_trait::async_trait;
use codenote_types::{
    AnnotateRequest, ContentEntry, Repository, RepositoryAnnotateRequest, User,
};

pub mod error;
pub mod http_client;

pub use error::ClientError;

/// Name of the cookie carrying the session credential.
pub const AUTH_COOKIE: &str = "authorization";

/// Lifetime of the session credential, in seconds (7 days).
pub const AUTH_COOKIE_MAX_AGE_SECS: i64 = 604_800;

#[async_trait]
pub trait BackendClient: Send + Sync {
    /// Entry point that redirects the browser to the identity provider.
    fn login_url(&self) -> String;

    async fn health_check(&self) -> Result<(), ClientError>;

    async fn current_user(&self, token: &str) -> Result<User, ClientError>;

    async fn list_repositories(&self, token: &str) -> Result<Vec<Repository>, ClientError>;

    async fn list_contents(
        &self,
        token: &str,
        owner: &str,
        repo: &str,
        path: &str,
    ) -> Result<Vec<ContentEntry>, ClientError>;

    /// Annotate raw source text. Needs no credential.
    async fn annotate(&self, request: &AnnotateRequest) -> Result<String, ClientError>;

    /// Annotate a file the backend fetches from GitHub on the user's behalf.
    async fn annotate_repository_file(
        &self,
        token: &str,
        request: &RepositoryAnnotateRequest,
    ) -> Result<String, ClientError>;

    async fn logout(&self, token: &str) -> Result<(), ClientError>;
}

pub type BackendClientBox = Box<dyn BackendClient>;

/// Factory for creating BackendClient instances
pub struct BackendClientFactory;

impl BackendClientFactory {
    pub fn create_http_client(base_url: String, timeout: Duration) -> BackendClientBox {
        Box::new(http_client::HttpBackendClient::new(base_url).with_timeout(timeout))
    }
}
