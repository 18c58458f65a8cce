use codenote_client::ClientError;
use codenote_types::{ContentEntry, Repository, User};

/// Completion of an [`super::Action`].
#[derive(Debug)]
pub enum Event {
    HealthChecked(Result<(), ClientError>),
    /// `token` is the credential the profile was requested with.
    UserLoaded {
        token: String,
        result: Result<User, ClientError>,
    },
    RepositoriesLoaded {
        seq: u64,
        result: Result<Vec<Repository>, ClientError>,
    },
    ContentsLoaded {
        seq: u64,
        result: Result<Vec<ContentEntry>, ClientError>,
    },
    AnnotationFinished {
        seq: u64,
        result: Result<String, ClientError>,
    },
    LoggedOut(Result<(), ClientError>),
}
