use std::sync::Arc;

use anyhow::Result;
use codenote_client::BackendClientBox;
use tokio::sync::mpsc;

use crate::domain::models::Action;
use crate::domain::models::AnnotationBody;
use crate::domain::models::Event;

async fn run_action(client: &BackendClientBox, action: Action) -> Event {
    match action {
        Action::HealthCheck => Event::HealthChecked(client.health_check().await),
        Action::FetchUser { token } => {
            let result = client.current_user(&token).await;
            Event::UserLoaded { token, result }
        }
        Action::FetchRepositories { seq, token } => Event::RepositoriesLoaded {
            seq,
            result: client.list_repositories(&token).await,
        },
        Action::FetchContents {
            seq,
            token,
            owner,
            repo,
            path,
        } => Event::ContentsLoaded {
            seq,
            result: client.list_contents(&token, &owner, &repo, &path).await,
        },
        Action::Annotate {
            seq,
            token,
            request,
        } => {
            let result = match request.body() {
                AnnotationBody::Pasted(body) => client.annotate(&body).await,
                AnnotationBody::RepositoryFile(body) => {
                    let token = token.unwrap_or_default();
                    client.annotate_repository_file(&token, &body).await
                }
            };
            Event::AnnotationFinished { seq, result }
        }
        Action::Logout { token } => Event::LoggedOut(client.logout(&token).await),
    }
}

pub struct ActionsService {}

impl ActionsService {
    /// Runs every queued action on its own task until the action channel
    /// closes. Nothing is cancelled: each call reports back as an [`Event`].
    pub async fn start(
        backend_client: BackendClientBox,
        event_tx: mpsc::UnboundedSender<Event>,
        rx: &mut mpsc::UnboundedReceiver<Action>,
    ) -> Result<()> {
        let backend_client_arc = Arc::new(backend_client);

        while let Some(action) = rx.recv().await {
            let kind: &'static str = (&action).into();
            tracing::debug!(action = kind, "dispatching action");

            let client_worker = backend_client_arc.clone();
            let worker_event_tx = event_tx.clone();
            tokio::spawn(async move {
                let event = run_action(&client_worker, action).await;
                if worker_event_tx.send(event).is_err() {
                    tracing::debug!("event receiver dropped before completion");
                }
            });
        }

        return Ok(());
    }
}
