#[cfg(test)]
#[path = "dispatcher_test.rs"]
mod tests;

use codenote_client::ClientError;
use codenote_types::{CommentLevel, Language};
use thiserror::Error;

use crate::domain::models::{
    Action, AnnotationRequest, AnnotationResult, AnnotationSource, InputTab, NavigationState,
    Session,
};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SubmitError {
    #[error("an annotation request is already in progress")]
    InFlight,
    #[error("there is no code to annotate")]
    EmptyBuffer,
    #[error("no repository file is selected")]
    NoFileSelected,
    #[error("not signed in")]
    Unauthenticated,
}

/// Everything a submit reads, captured at the moment of submission.
#[derive(Debug, Clone, Copy)]
pub struct SubmitInput<'a> {
    pub tab: InputTab,
    pub code: &'a str,
    pub navigation: &'a NavigationState,
    pub session: Option<&'a Session>,
    pub language: Language,
    pub comment_level: CommentLevel,
}

/// How the submit control should be drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitControl {
    Ready,
    Disabled,
    InProgress,
}

/// Sends at most one annotation request at a time and owns its result.
#[derive(Debug, Default)]
pub struct AnnotationDispatcher {
    in_flight: Option<u64>,
    next_seq: u64,
    result: Option<AnnotationResult>,
}

impl AnnotationDispatcher {
    pub fn new() -> AnnotationDispatcher {
        return AnnotationDispatcher::default();
    }

    /// Builds the request for whichever tab is active.
    pub fn compose(input: &SubmitInput<'_>) -> Result<AnnotationRequest, SubmitError> {
        let source = if input.tab.is_repository() {
            let file = input
                .navigation
                .selected_file
                .as_ref()
                .ok_or(SubmitError::NoFileSelected)?;
            let repository = input
                .navigation
                .selected_repository
                .as_ref()
                .ok_or(SubmitError::NoFileSelected)?;
            if input.session.is_none() {
                return Err(SubmitError::Unauthenticated);
            }

            AnnotationSource::RepositoryFile {
                owner: repository.owner().to_string(),
                repo: repository.name().to_string(),
                path: file.path.clone(),
            }
        } else {
            if input.code.is_empty() {
                return Err(SubmitError::EmptyBuffer);
            }

            AnnotationSource::Pasted(input.code.to_string())
        };

        return Ok(AnnotationRequest {
            source,
            language: input.language,
            comment_level: input.comment_level,
        });
    }

    pub fn submit_control(&self, input: &SubmitInput<'_>) -> SubmitControl {
        if self.is_busy() {
            return SubmitControl::InProgress;
        }

        match AnnotationDispatcher::compose(input) {
            Ok(_) => SubmitControl::Ready,
            Err(_) => SubmitControl::Disabled,
        }
    }

    pub fn can_submit(&self, input: &SubmitInput<'_>) -> bool {
        return self.submit_control(input) == SubmitControl::Ready;
    }

    pub fn submit(&mut self, input: &SubmitInput<'_>) -> Result<Action, SubmitError> {
        if self.is_busy() {
            return Err(SubmitError::InFlight);
        }

        let request = AnnotationDispatcher::compose(input)?;
        let token = if request.requires_session() {
            input.session.map(|s| s.token.clone())
        } else {
            None
        };

        self.next_seq += 1;
        self.in_flight = Some(self.next_seq);
        tracing::debug!(seq = self.next_seq, source = ?request.source, "submitting annotation");

        return Ok(Action::Annotate {
            seq: self.next_seq,
            token,
            request,
        });
    }

    /// Returns whether the response was the awaited one.
    pub fn apply(&mut self, seq: u64, result: Result<String, ClientError>) -> bool {
        if self.in_flight != Some(seq) {
            tracing::debug!(seq, "discarding stale annotation response");
            return false;
        }
        self.in_flight = None;

        self.result = Some(match result {
            Ok(annotated) => AnnotationResult::annotated(annotated),
            Err(err) => {
                tracing::error!(error = %err, "annotation failed");
                AnnotationResult::diagnostic(&err)
            }
        });

        return true;
    }

    pub fn reset(&mut self) {
        self.in_flight = None;
        self.result = None;
    }

    pub fn is_busy(&self) -> bool {
        return self.in_flight.is_some();
    }

    pub fn result(&self) -> Option<&AnnotationResult> {
        return self.result.as_ref();
    }
}
