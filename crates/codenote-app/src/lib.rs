//! Client-side core of codenote.
//!
//! This crate owns everything between the user's intents and the backend:
//! the authenticated session, the repository browser state machine, and the
//! annotation dispatcher. State lives in [`AppState`] and only changes in
//! response to an intent method or a completion [`Event`]; network calls are
//! expressed as [`Action`]s and executed by [`ActionsService`].

pub mod application;
pub mod configuration;
pub mod domain;
pub mod infrastructure;

pub use application::{Runtime, RuntimeProps};
pub use configuration::{Config, ConfigKey};
pub use domain::models::{
    Action, AnnotationRequest, AnnotationResult, AnnotationSource, BrowserPhase, EntriesView,
    Event, InputTab, NavigationState, Session,
};
pub use domain::services::{
    ActionsService, AppState, AppStateProps, BrowserError, SubmitControl, SubmitError, UploadError,
};
pub use infrastructure::{FileCredentialStore, MemoryCredentialStore, MemoryLocation};
