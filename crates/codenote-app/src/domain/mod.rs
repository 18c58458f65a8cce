//! Core domain logic.
//!
//! Models describe the state and the messages flowing through the system;
//! services own the transitions. Nothing here performs I/O directly except
//! through the credential store and location traits.

pub mod models;
pub mod services;
