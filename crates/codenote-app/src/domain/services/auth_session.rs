#[cfg(test)]
#[path = "auth_session_test.rs"]
mod tests;

use chrono::Utc;
use codenote_client::ClientError;
use codenote_types::User;
use reqwest::Url;

use crate::domain::models::{
    Action, CredentialStoreBox, LocationBox, Session, StoredCredential, TOKEN_QUERY_PARAM,
};

/// Splits the token parameter off an address. Returns the token (possibly
/// empty) and the address without it, or `None` when there is no parameter.
fn take_token_param(href: &str) -> Option<(String, String)> {
    let mut url = Url::parse(href).ok()?;
    let mut token = None;
    let mut kept: Vec<(String, String)> = vec![];
    for (key, value) in url.query_pairs() {
        if key == TOKEN_QUERY_PARAM {
            token = Some(value.into_owned());
        } else {
            kept.push((key.into_owned(), value.into_owned()));
        }
    }

    let token = token?;
    if kept.is_empty() {
        url.set_query(None);
    } else {
        url.query_pairs_mut().clear().extend_pairs(kept);
    }

    return Some((token, url.to_string()));
}

/// Owns the single authenticated identity of the process.
pub struct AuthSessionManager {
    session: Option<Session>,
    credentials: CredentialStoreBox,
    location: LocationBox,
    login_url: String,
    awaiting_profile: bool,
    awaiting_logout: bool,
}

impl AuthSessionManager {
    pub fn new(
        credentials: CredentialStoreBox,
        location: LocationBox,
        login_url: String,
    ) -> AuthSessionManager {
        return AuthSessionManager {
            session: None,
            credentials,
            location,
            login_url,
            awaiting_profile: false,
            awaiting_logout: false,
        };
    }

    /// Discovers a token from the address or the credential store.
    ///
    /// Returns the profile fetch to run when a new session was established.
    /// Rediscovering the token already in use keeps the current session.
    pub fn bootstrap(&mut self) -> Option<Action> {
        let href = self.location.href();
        if let Some((token, stripped)) = take_token_param(&href) {
            self.location.replace(&stripped);
            if !token.is_empty() {
                self.persist(&token);
                return self.adopt(token);
            }
        }

        let stored = match self.credentials.load() {
            Ok(stored) => stored,
            Err(err) => {
                tracing::warn!(error = %err, "could not read persisted credential");
                None
            }
        };

        match stored {
            Some(credential) if !credential.is_expired(Utc::now()) => {
                return self.adopt(credential.token);
            }
            Some(_) => {
                tracing::info!("persisted credential expired");
                self.expire_persisted();
            }
            None => {}
        }

        return None;
    }

    /// Sends the user off to the identity provider.
    pub fn login(&mut self) {
        let login_url = self.login_url.clone();
        self.location.assign(&login_url);
    }

    /// Drops the session locally, whatever the server makes of it. Returns the
    /// server-side invalidation to run, if there was a session.
    pub fn logout(&mut self) -> Option<Action> {
        let session = self.session.take();
        self.awaiting_profile = false;
        self.expire_persisted();

        let session = session?;
        self.awaiting_logout = true;
        return Some(Action::Logout {
            token: session.token,
        });
    }

    pub fn handle_user_loaded(&mut self, token: &str, result: Result<User, ClientError>) {
        let session = match self.session.as_mut() {
            Some(session) if session.token == token => session,
            _ => {
                tracing::debug!("discarding profile for a superseded session");
                return;
            }
        };
        self.awaiting_profile = false;

        match result {
            Ok(user) => {
                tracing::info!(login = %user.login, "signed in");
                session.user = Some(user);
            }
            Err(err) => {
                tracing::warn!(error = %err, "profile fetch failed, continuing without user");
                session.user = None;
            }
        }
    }

    pub fn handle_logged_out(&mut self, result: Result<(), ClientError>) {
        self.awaiting_logout = false;
        if let Err(err) = result {
            tracing::warn!(error = %err, "server-side logout failed, local session already cleared");
        }
    }

    pub fn session(&self) -> Option<&Session> {
        return self.session.as_ref();
    }

    pub fn token(&self) -> Option<&str> {
        return self.session.as_ref().map(|s| s.token.as_str());
    }

    pub fn user(&self) -> Option<&User> {
        return self.session.as_ref().and_then(|s| s.user.as_ref());
    }

    pub fn is_authenticated(&self) -> bool {
        return self.session.is_some();
    }

    pub fn is_waiting(&self) -> bool {
        return self.awaiting_profile || self.awaiting_logout;
    }

    pub fn location_href(&self) -> String {
        return self.location.href();
    }

    fn adopt(&mut self, token: String) -> Option<Action> {
        if self.token() == Some(token.as_str()) {
            return None;
        }

        self.session = Some(Session::new(token.clone()));
        self.awaiting_profile = true;
        return Some(Action::FetchUser { token });
    }

    fn persist(&mut self, token: &str) {
        let credential = StoredCredential::issue(token, Utc::now());
        if let Err(err) = self.credentials.save(&credential) {
            tracing::error!(error = %err, "failed to persist credential");
        }
    }

    fn expire_persisted(&mut self) {
        if let Err(err) = self.credentials.clear() {
            tracing::error!(error = %err, "failed to expire persisted credential");
        }
    }
}
