use codenote_types::{ContentEntry, Repository};

/// Where the repository browser currently is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BrowserPhase {
    NoSession,
    RepoListing,
    DirectoryListing(String),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NavigationState {
    pub selected_repository: Option<Repository>,
    pub current_path: String,
    /// Paths left behind by successive directory descents, oldest first.
    pub path_history: Vec<String>,
    pub entries: Vec<ContentEntry>,
    /// Always a file entry from `entries`.
    pub selected_file: Option<ContentEntry>,
}

impl NavigationState {
    pub fn clear_listing(&mut self) {
        self.current_path.clear();
        self.path_history.clear();
        self.entries.clear();
        self.selected_file = None;
    }
}

/// What the entry list area should show.
#[derive(Debug, PartialEq, Eq)]
pub enum EntriesView<'a> {
    Loading,
    Entries(&'a [ContentEntry]),
}
