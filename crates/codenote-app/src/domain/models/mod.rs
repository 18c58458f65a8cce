mod action;
mod annotation;
mod credential_store;
mod event;
mod language;
mod location;
mod navigation;
mod session;

pub use action::*;
pub use annotation::*;
pub use credential_store::*;
pub use event::*;
pub use language::*;
pub use location::*;
pub use navigation::*;
pub use session::*;
