//! Type definitions for the codenote backend API
//!
//! This crate is the shared contract between the HTTP client and the
//! application core. Everything that crosses the wire lives here: the user
//! profile, repository and directory listing shapes, the two annotation
//! request bodies and the error body returned on non-success responses.
//!
//! ## Example
//!
//! ```rust
//! use codenote_types::{AnnotateRequest, CommentLevel, Language};
//!
//! let request = AnnotateRequest {
//!     code: "print(1)".to_string(),
//!     language: Language::Python,
//!     comment_level: CommentLevel::Standard,
//! };
//!
//! let body = serde_json::to_value(&request).unwrap();
//! assert_eq!(body["comment_level"], "standard");
//! ```

pub mod api;
pub mod types;

pub use api::*;
pub use types::*;
