use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use crate::domain::models::{CredentialError, CredentialStore, StoredCredential};

/// Keeps the credential as a JSON file, typically in the user's cache dir.
pub struct FileCredentialStore {
    path: PathBuf,
}

impl FileCredentialStore {
    pub fn new(path: PathBuf) -> FileCredentialStore {
        return FileCredentialStore { path };
    }
}

impl CredentialStore for FileCredentialStore {
    fn load(&self) -> Result<Option<StoredCredential>, CredentialError> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(err.into()),
        };

        let credential = serde_json::from_str::<StoredCredential>(&contents)?;
        return Ok(Some(credential));
    }

    fn save(&self, credential: &StoredCredential) -> Result<(), CredentialError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, serde_json::to_string_pretty(credential)?)?;
        tracing::debug!(path = %self.path.display(), "credential persisted");

        return Ok(());
    }

    fn clear(&self) -> Result<(), CredentialError> {
        match fs::remove_file(&self.path) {
            Ok(()) => {}
            Err(err) if err.kind() == ErrorKind::NotFound => {}
            Err(err) => return Err(err.into()),
        }

        return Ok(());
    }
}

/// In-process store. Clones share the same slot.
#[derive(Clone, Default)]
pub struct MemoryCredentialStore {
    slot: Arc<Mutex<Option<StoredCredential>>>,
}

impl MemoryCredentialStore {
    pub fn with_credential(credential: StoredCredential) -> MemoryCredentialStore {
        return MemoryCredentialStore {
            slot: Arc::new(Mutex::new(Some(credential))),
        };
    }

    pub fn current(&self) -> Option<StoredCredential> {
        return self.slot.lock().unwrap_or_else(|e| e.into_inner()).clone();
    }
}

impl CredentialStore for MemoryCredentialStore {
    fn load(&self) -> Result<Option<StoredCredential>, CredentialError> {
        return Ok(self.current());
    }

    fn save(&self, credential: &StoredCredential) -> Result<(), CredentialError> {
        *self.slot.lock().unwrap_or_else(|e| e.into_inner()) = Some(credential.clone());
        return Ok(());
    }

    fn clear(&self) -> Result<(), CredentialError> {
        *self.slot.lock().unwrap_or_else(|e| e.into_inner()) = None;
        return Ok(());
    }
}
