use codenote_client::ClientError;
use codenote_types::{AnnotateRequest, CommentLevel, Language, RepositoryAnnotateRequest};
use strum_macros::{Display, EnumIter, EnumString};

/// Troubleshooting list appended to every failed annotation.
pub const TROUBLESHOOTING_CHECKLIST: &str = "Please make sure:
1. The backend server is running
2. Your OpenAI API key is configured
3. You have an active internet connection";

/// Input tab the user has in front of them. `Upload` and `Paste` share the
/// one code buffer; `Github` submits the browser's selected file.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Display, EnumString, EnumIter)]
#[strum(serialize_all = "kebab-case")]
pub enum InputTab {
    #[default]
    Upload,
    Paste,
    Github,
}

impl InputTab {
    pub fn is_repository(&self) -> bool {
        return *self == InputTab::Github;
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnnotationSource {
    Pasted(String),
    /// Pointer to a file the backend resolves itself. No bytes are sent.
    RepositoryFile {
        owner: String,
        repo: String,
        path: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnnotationRequest {
    pub source: AnnotationSource,
    pub language: Language,
    pub comment_level: CommentLevel,
}

/// Wire body for an [`AnnotationRequest`], one per endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnnotationBody {
    Pasted(AnnotateRequest),
    RepositoryFile(RepositoryAnnotateRequest),
}

impl AnnotationRequest {
    pub fn requires_session(&self) -> bool {
        return matches!(self.source, AnnotationSource::RepositoryFile { .. });
    }

    pub fn body(&self) -> AnnotationBody {
        match &self.source {
            AnnotationSource::Pasted(code) => AnnotationBody::Pasted(AnnotateRequest {
                code: code.clone(),
                language: self.language,
                comment_level: self.comment_level,
            }),
            AnnotationSource::RepositoryFile { owner, repo, path } => {
                AnnotationBody::RepositoryFile(RepositoryAnnotateRequest {
                    owner: owner.clone(),
                    repo: repo.clone(),
                    path: path.clone(),
                    language: self.language,
                    comment_level: self.comment_level,
                })
            }
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum ResultType {
    #[default]
    Annotated,
    Diagnostic,
}

/// The text in the output pane. Always replaced whole.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AnnotationResult {
    pub annotated_code: String,
    pub result_type: ResultType,
}

impl AnnotationResult {
    pub fn annotated(code: String) -> AnnotationResult {
        return AnnotationResult {
            annotated_code: code,
            result_type: ResultType::Annotated,
        };
    }

    pub fn diagnostic(err: &ClientError) -> AnnotationResult {
        return AnnotationResult {
            annotated_code: format!("Error: {}\n\n{TROUBLESHOOTING_CHECKLIST}", err.detail()),
            result_type: ResultType::Diagnostic,
        };
    }

    pub fn is_diagnostic(&self) -> bool {
        return self.result_type == ResultType::Diagnostic;
    }
}

/// A local file loaded into the code buffer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UploadedFile {
    pub name: String,
    pub size: usize,
}
