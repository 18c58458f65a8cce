use thiserror::Error;

/// Failure of a backend call.
///
/// Every variant is non-fatal for the caller: the application turns it into a
/// degraded state or a diagnostic and keeps running.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ClientError {
    /// The request never produced a response (connect error, timeout, reset).
    #[error("request failed: {0}")]
    Transport(String),
    /// Non-success status. `detail` comes from the `{detail}` error body.
    #[error("server returned {status}: {}", detail.as_deref().unwrap_or("no detail"))]
    Server { status: u16, detail: Option<String> },
    /// Success status, but the body did not decode into the expected shape.
    #[error("malformed response: {0}")]
    Malformed(String),
}

impl ClientError {
    /// The raw error detail surfaced to users: the server's `detail` when it
    /// sent one, otherwise the HTTP status.
    pub fn detail(&self) -> String {
        match self {
            ClientError::Transport(message) => message.clone(),
            ClientError::Server { status, detail } => match detail.as_deref() {
                Some(detail) if !detail.is_empty() => detail.to_string(),
                _ => format!("HTTP error! status: {status}"),
            },
            ClientError::Malformed(message) => format!("malformed response: {message}"),
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Server { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        ClientError::Transport(err.to_string())
    }
}
