use chrono::{DateTime, Duration, Utc};
use codenote_client::AUTH_COOKIE_MAX_AGE_SECS;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CredentialError {
    #[error("credential store I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("credential record is corrupt: {0}")]
    Corrupt(#[from] serde_json::Error),
}

/// The persisted form of the session token, the cookie equivalent.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct StoredCredential {
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

impl StoredCredential {
    pub fn issue(token: &str, now: DateTime<Utc>) -> StoredCredential {
        return StoredCredential {
            token: token.to_string(),
            expires_at: now + Duration::seconds(AUTH_COOKIE_MAX_AGE_SECS),
        };
    }

    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        return now >= self.expires_at;
    }
}

/// Holds at most one credential. `save` replaces whatever was there.
pub trait CredentialStore: Send {
    fn load(&self) -> Result<Option<StoredCredential>, CredentialError>;
    fn save(&self, credential: &StoredCredential) -> Result<(), CredentialError>;
    fn clear(&self) -> Result<(), CredentialError>;
}

pub type CredentialStoreBox = Box<dyn CredentialStore>;
