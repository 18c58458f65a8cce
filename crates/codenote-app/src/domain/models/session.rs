use codenote_types::User;

/// Query parameter the OAuth callback uses to hand the token to the client.
pub const TOKEN_QUERY_PARAM: &str = "token";

/// The one authenticated identity of this process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub token: String,
    /// Absent until the profile fetch succeeds, and stays absent if it fails.
    pub user: Option<User>,
}

impl Session {
    pub fn new(token: String) -> Session {
        return Session { token, user: None };
    }
}
