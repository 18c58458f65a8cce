mod actions;
mod app_state;
mod auth_session;
mod dispatcher;
mod repository_browser;

pub use actions::*;
pub use app_state::*;
pub use auth_session::*;
pub use dispatcher::*;
pub use repository_browser::*;
