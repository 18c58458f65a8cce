pub mod credentials;
pub mod location;

pub use credentials::{FileCredentialStore, MemoryCredentialStore};
pub use location::MemoryLocation;
