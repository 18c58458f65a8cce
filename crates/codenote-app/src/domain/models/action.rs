use strum_macros::IntoStaticStr;

use super::AnnotationRequest;

/// Outbound work for the [`crate::ActionsService`]. Each variant maps to one
/// backend call; its completion comes back as an [`super::Event`].
#[derive(Debug, Clone, PartialEq, Eq, IntoStaticStr)]
pub enum Action {
    HealthCheck,
    FetchUser {
        token: String,
    },
    FetchRepositories {
        seq: u64,
        token: String,
    },
    FetchContents {
        seq: u64,
        token: String,
        owner: String,
        repo: String,
        path: String,
    },
    Annotate {
        seq: u64,
        token: Option<String>,
        request: AnnotationRequest,
    },
    Logout {
        token: String,
    },
}
