use std::ops::Deref;
use std::ops::DerefMut;

use anyhow::anyhow;
use anyhow::Result;
use codenote_client::BackendClientBox;
use codenote_types::{CommentLevel, Language};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::domain::models::Action;
use crate::domain::models::CredentialStoreBox;
use crate::domain::models::Event;
use crate::domain::models::LocationBox;
use crate::domain::services::ActionsService;
use crate::domain::services::AppState;
use crate::domain::services::AppStateProps;

pub struct RuntimeProps {
    pub backend_client: BackendClientBox,
    pub credentials: CredentialStoreBox,
    pub location: LocationBox,
    pub language: Language,
    pub comment_level: CommentLevel,
}

/// An [`AppState`] plus the worker running its actions. Dereferences to the
/// state, so intents are called on the runtime directly.
pub struct Runtime {
    state: AppState,
    event_rx: mpsc::UnboundedReceiver<Event>,
    worker: JoinHandle<Result<()>>,
}

impl Runtime {
    /// Must be called from within a tokio runtime.
    pub fn start(props: RuntimeProps) -> Runtime {
        let (action_tx, mut action_rx) = mpsc::unbounded_channel::<Action>();
        let (event_tx, event_rx) = mpsc::unbounded_channel::<Event>();

        let state = AppState::new(AppStateProps {
            credentials: props.credentials,
            location: props.location,
            login_url: props.backend_client.login_url(),
            language: props.language,
            comment_level: props.comment_level,
            action_tx,
        });

        let backend_client = props.backend_client;
        let worker = tokio::spawn(async move {
            return ActionsService::start(backend_client, event_tx, &mut action_rx).await;
        });

        return Runtime {
            state,
            event_rx,
            worker,
        };
    }

    /// Applies completion events until nothing is outstanding.
    pub async fn settle(&mut self) -> Result<()> {
        while self.state.is_waiting() {
            let event = self
                .event_rx
                .recv()
                .await
                .ok_or_else(|| anyhow!("action worker stopped before all calls completed"))?;
            self.state.handle_event(event);
        }

        return Ok(());
    }
}

impl Deref for Runtime {
    type Target = AppState;

    fn deref(&self) -> &AppState {
        return &self.state;
    }
}

impl DerefMut for Runtime {
    fn deref_mut(&mut self) -> &mut AppState {
        return &mut self.state;
    }
}

impl Drop for Runtime {
    fn drop(&mut self) {
        self.worker.abort();
    }
}
