use anyhow::Result;
use codenote_types::{CommentLevel, ContentEntry, Language, Repository, User};
use thiserror::Error;
use tokio::sync::mpsc;

use super::AnnotationDispatcher;
use super::AuthSessionManager;
use super::OpenOutcome;
use super::RepositoryBrowser;
use super::SubmitControl;
use super::SubmitInput;
use crate::domain::models::is_accepted_upload;
use crate::domain::models::Action;
use crate::domain::models::AnnotationResult;
use crate::domain::models::BrowserPhase;
use crate::domain::models::CredentialStoreBox;
use crate::domain::models::EntriesView;
use crate::domain::models::Event;
use crate::domain::models::InputTab;
use crate::domain::models::LocationBox;
use crate::domain::models::UploadedFile;

#[cfg(test)]
#[path = "app_state_test.rs"]
mod tests;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum UploadError {
    #[error("'{0}' is not a supported source file")]
    Unsupported(String),
}

pub struct AppStateProps {
    pub credentials: CredentialStoreBox,
    pub location: LocationBox,
    pub login_url: String,
    pub language: Language,
    pub comment_level: CommentLevel,
    pub action_tx: mpsc::UnboundedSender<Action>,
}

/// The whole client state. Intent methods queue [`Action`]s; their
/// completions come back through [`AppState::handle_event`].
pub struct AppState {
    pub auth: AuthSessionManager,
    pub browser: RepositoryBrowser,
    pub dispatcher: AnnotationDispatcher,
    pub active_tab: InputTab,
    pub code: String,
    pub uploaded_file: Option<UploadedFile>,
    pub language: Language,
    pub comment_level: CommentLevel,
    /// `None` until a health check has completed.
    pub backend_healthy: Option<bool>,
    awaiting_health: bool,
    action_tx: mpsc::UnboundedSender<Action>,
}

impl AppState {
    pub fn new(props: AppStateProps) -> AppState {
        return AppState {
            auth: AuthSessionManager::new(props.credentials, props.location, props.login_url),
            browser: RepositoryBrowser::new(),
            dispatcher: AnnotationDispatcher::new(),
            active_tab: InputTab::default(),
            code: String::new(),
            uploaded_file: None,
            language: props.language,
            comment_level: props.comment_level,
            backend_healthy: None,
            awaiting_health: false,
            action_tx: props.action_tx,
        };
    }

    /// Restores or adopts a session, then loads its profile and repositories.
    /// A session that is already active is left alone.
    pub fn bootstrap(&mut self) -> Result<()> {
        let superseding = self.auth.is_authenticated();
        let action = match self.auth.bootstrap() {
            Some(action) => action,
            None => return Ok(()),
        };

        if superseding {
            self.browser.reset();
        }
        self.action_tx.send(action)?;
        self.list_repositories()?;

        return Ok(());
    }

    pub fn login(&mut self) {
        self.auth.login();
    }

    pub fn logout(&mut self) -> Result<()> {
        let action = self.auth.logout();
        self.browser.reset();
        self.dispatcher.reset();

        if let Some(action) = action {
            self.action_tx.send(action)?;
        }

        return Ok(());
    }

    pub fn set_tab(&mut self, tab: InputTab) {
        self.active_tab = tab;
    }

    pub fn set_code(&mut self, code: &str) {
        self.code = code.to_string();
    }

    /// Loads a local file into the shared code buffer.
    pub fn upload_file(&mut self, name: &str, content: &str) -> Result<(), UploadError> {
        if !is_accepted_upload(name) {
            tracing::warn!(file = name, "rejected upload");
            return Err(UploadError::Unsupported(name.to_string()));
        }

        self.code = content.to_string();
        self.uploaded_file = Some(UploadedFile {
            name: name.to_string(),
            size: content.len(),
        });

        return Ok(());
    }

    pub fn set_language(&mut self, language: Language) {
        self.language = language;
    }

    pub fn set_comment_level(&mut self, comment_level: CommentLevel) {
        self.comment_level = comment_level;
    }

    pub fn list_repositories(&mut self) -> Result<()> {
        let action = self.browser.list_repositories(self.auth.session())?;
        self.action_tx.send(action)?;

        return Ok(());
    }

    pub fn select_repository(&mut self, repository: &Repository) -> Result<()> {
        let action = self
            .browser
            .select_repository(self.auth.session(), repository)?;
        self.action_tx.send(action)?;

        return Ok(());
    }

    pub fn open_entry(&mut self, entry: &ContentEntry) -> Result<()> {
        match self.browser.open_entry(self.auth.session(), entry)? {
            OpenOutcome::Descend(action) => {
                self.action_tx.send(action)?;
            }
            OpenOutcome::FileSelected(Some(language)) => {
                self.language = language;
            }
            OpenOutcome::FileSelected(None) => {}
        }

        return Ok(());
    }

    pub fn go_back(&mut self) -> Result<()> {
        if let Some(action) = self.browser.go_back(self.auth.session())? {
            self.action_tx.send(action)?;
        }

        return Ok(());
    }

    pub fn change_repository(&mut self) -> Result<()> {
        self.browser.change_repository()?;
        return Ok(());
    }

    pub fn submit(&mut self) -> Result<()> {
        let input = SubmitInput {
            tab: self.active_tab,
            code: &self.code,
            navigation: self.browser.state(),
            session: self.auth.session(),
            language: self.language,
            comment_level: self.comment_level,
        };
        let action = self.dispatcher.submit(&input)?;
        self.action_tx.send(action)?;

        return Ok(());
    }

    pub fn health_check(&mut self) -> Result<()> {
        self.action_tx.send(Action::HealthCheck)?;
        self.awaiting_health = true;
        return Ok(());
    }

    pub fn handle_event(&mut self, event: Event) {
        match event {
            Event::HealthChecked(result) => {
                if let Err(err) = &result {
                    tracing::warn!(error = %err, "backend health check failed");
                }
                self.awaiting_health = false;
                self.backend_healthy = Some(result.is_ok());
            }
            Event::UserLoaded { token, result } => {
                self.auth.handle_user_loaded(&token, result);
            }
            Event::RepositoriesLoaded { seq, result } => {
                self.browser.apply_repositories(seq, result);
            }
            Event::ContentsLoaded { seq, result } => {
                self.browser.apply_contents(seq, result);
            }
            Event::AnnotationFinished { seq, result } => {
                self.dispatcher.apply(seq, result);
            }
            Event::LoggedOut(result) => {
                self.auth.handle_logged_out(result);
            }
        }
    }

    pub fn submit_control(&self) -> SubmitControl {
        return self.dispatcher.submit_control(&SubmitInput {
            tab: self.active_tab,
            code: &self.code,
            navigation: self.browser.state(),
            session: self.auth.session(),
            language: self.language,
            comment_level: self.comment_level,
        });
    }

    pub fn phase(&self) -> BrowserPhase {
        return self.browser.phase(self.auth.is_authenticated());
    }

    pub fn entries_view(&self) -> EntriesView<'_> {
        return self.browser.entries_view();
    }

    pub fn user(&self) -> Option<&User> {
        return self.auth.user();
    }

    pub fn result(&self) -> Option<&AnnotationResult> {
        return self.dispatcher.result();
    }

    /// True while any backend call this state is waiting on is outstanding.
    pub fn is_waiting(&self) -> bool {
        return self.awaiting_health
            || self.auth.is_waiting()
            || self.browser.is_busy()
            || self.dispatcher.is_busy();
    }
}
