#[cfg(test)]
#[path = "repository_browser_test.rs"]
mod tests;

use codenote_client::ClientError;
use codenote_types::{sort_entries, ContentEntry, Language, Repository};
use thiserror::Error;

use crate::domain::models::{
    infer_language, Action, BrowserPhase, EntriesView, NavigationState, Session,
};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BrowserError {
    #[error("a listing is still loading")]
    Busy,
    #[error("not signed in")]
    NoSession,
    #[error("no repository selected")]
    NoRepository,
    #[error("'{0}' is not in the current listing")]
    NotInListing(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Fetch {
    Repositories,
    Root,
    Descend { from: String, to: String },
    Back { to: String },
}

#[derive(Debug, Clone)]
struct Pending {
    seq: u64,
    fetch: Fetch,
}

/// Result of opening a listing entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OpenOutcome {
    /// A directory: the listing fetch to run.
    Descend(Action),
    /// A file is now selected; carries the inferred language, if any.
    FileSelected(Option<Language>),
}

/// Navigator over one user's repositories and their directory trees.
///
/// Every fetch carries a sequence number. Path and history only change once
/// the awaited response arrives, and only the awaited one counts.
#[derive(Debug, Default)]
pub struct RepositoryBrowser {
    repositories: Vec<Repository>,
    state: NavigationState,
    pending: Option<Pending>,
    next_seq: u64,
}

impl RepositoryBrowser {
    pub fn new() -> RepositoryBrowser {
        return RepositoryBrowser::default();
    }

    pub fn phase(&self, authenticated: bool) -> BrowserPhase {
        if !authenticated {
            return BrowserPhase::NoSession;
        }

        match self.state.selected_repository {
            Some(_) => BrowserPhase::DirectoryListing(self.state.current_path.clone()),
            None => BrowserPhase::RepoListing,
        }
    }

    pub fn state(&self) -> &NavigationState {
        return &self.state;
    }

    pub fn repositories(&self) -> &[Repository] {
        return &self.repositories;
    }

    pub fn is_busy(&self) -> bool {
        return self.pending.is_some();
    }

    pub fn entries_view(&self) -> EntriesView<'_> {
        if self.is_busy() {
            return EntriesView::Loading;
        }

        return EntriesView::Entries(&self.state.entries);
    }

    pub fn list_repositories(&mut self, session: Option<&Session>) -> Result<Action, BrowserError> {
        let token = self.ready(session)?;
        let seq = self.begin(Fetch::Repositories);

        return Ok(Action::FetchRepositories { seq, token });
    }

    pub fn select_repository(
        &mut self,
        session: Option<&Session>,
        repository: &Repository,
    ) -> Result<Action, BrowserError> {
        let token = self.ready(session)?;

        self.state.selected_repository = Some(repository.clone());
        self.state.clear_listing();

        let seq = self.begin(Fetch::Root);
        return Ok(Action::FetchContents {
            seq,
            token,
            owner: repository.owner().to_string(),
            repo: repository.name().to_string(),
            path: String::new(),
        });
    }

    pub fn open_entry(
        &mut self,
        session: Option<&Session>,
        entry: &ContentEntry,
    ) -> Result<OpenOutcome, BrowserError> {
        let token = self.ready(session)?;
        if self.state.selected_repository.is_none() {
            return Err(BrowserError::NoRepository);
        }
        if !self.state.entries.iter().any(|e| e.path == entry.path && e.kind == entry.kind) {
            return Err(BrowserError::NotInListing(entry.path.clone()));
        }

        if entry.is_file() {
            self.state.selected_file = Some(entry.clone());
            return Ok(OpenOutcome::FileSelected(infer_language(&entry.name)));
        }

        let from = self.state.current_path.clone();
        let action = self.fetch_contents(
            token,
            Fetch::Descend {
                from,
                to: entry.path.clone(),
            },
            &entry.path,
        )?;

        return Ok(OpenOutcome::Descend(action));
    }

    /// `Ok(None)` when there is nowhere to go back to.
    pub fn go_back(&mut self, session: Option<&Session>) -> Result<Option<Action>, BrowserError> {
        let token = self.ready(session)?;
        let to = match self.state.path_history.last() {
            Some(to) => to.clone(),
            None => return Ok(None),
        };

        let action = self.fetch_contents(token, Fetch::Back { to: to.clone() }, &to)?;
        return Ok(Some(action));
    }

    pub fn change_repository(&mut self) -> Result<(), BrowserError> {
        if self.is_busy() {
            return Err(BrowserError::Busy);
        }

        self.state = NavigationState::default();
        return Ok(());
    }

    /// Forgets everything, including whatever is in flight.
    pub fn reset(&mut self) {
        self.repositories.clear();
        self.state = NavigationState::default();
        self.pending = None;
    }

    /// Returns whether the response was the awaited one.
    pub fn apply_repositories(
        &mut self,
        seq: u64,
        result: Result<Vec<Repository>, ClientError>,
    ) -> bool {
        if self.take_pending(seq).is_none() {
            return false;
        }

        match result {
            Ok(repositories) => {
                tracing::debug!(count = repositories.len(), "repositories loaded");
                self.repositories = repositories;
            }
            Err(err) => {
                tracing::error!(error = %err, "failed to list repositories");
                self.repositories.clear();
            }
        }

        return true;
    }

    /// Returns whether the response was the awaited one.
    pub fn apply_contents(
        &mut self,
        seq: u64,
        result: Result<Vec<ContentEntry>, ClientError>,
    ) -> bool {
        let fetch = match self.take_pending(seq) {
            Some(fetch) => fetch,
            None => return false,
        };

        let mut entries = match result {
            Ok(entries) => entries,
            Err(err) => {
                tracing::error!(error = %err, ?fetch, "failed to list directory");
                return true;
            }
        };
        sort_entries(&mut entries);

        match fetch {
            Fetch::Repositories => {
                tracing::warn!("listing response answered a repositories fetch");
                return true;
            }
            Fetch::Root => {
                self.state.current_path.clear();
            }
            Fetch::Descend { from, to } => {
                self.state.path_history.push(from);
                self.state.current_path = to;
            }
            Fetch::Back { to } => {
                self.state.path_history.pop();
                self.state.current_path = to;
            }
        }
        self.state.entries = entries;
        self.state.selected_file = None;

        return true;
    }

    fn ready(&self, session: Option<&Session>) -> Result<String, BrowserError> {
        let session = session.ok_or(BrowserError::NoSession)?;
        if self.is_busy() {
            return Err(BrowserError::Busy);
        }

        return Ok(session.token.clone());
    }

    fn begin(&mut self, fetch: Fetch) -> u64 {
        self.next_seq += 1;
        self.pending = Some(Pending {
            seq: self.next_seq,
            fetch,
        });

        return self.next_seq;
    }

    fn fetch_contents(&mut self, token: String, fetch: Fetch, path: &str) -> Result<Action, BrowserError> {
        let repository = self
            .state
            .selected_repository
            .as_ref()
            .ok_or(BrowserError::NoRepository)?;
        let owner = repository.owner().to_string();
        let repo = repository.name().to_string();
        let seq = self.begin(fetch);

        return Ok(Action::FetchContents {
            seq,
            token,
            owner,
            repo,
            path: path.to_string(),
        });
    }

    fn take_pending(&mut self, seq: u64) -> Option<Fetch> {
        match &self.pending {
            Some(pending) if pending.seq == seq => {}
            _ => {
                tracing::debug!(seq, "discarding stale listing response");
                return None;
            }
        }

        return self.pending.take().map(|pending| pending.fetch);
    }
}
