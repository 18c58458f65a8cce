//! Wires the client state to the backend.
//!
//! [`Runtime`] owns an [`crate::AppState`] and the [`crate::ActionsService`]
//! task that executes its actions, and feeds completion events back in.

mod runtime;

pub use runtime::*;
