use std::sync::{Arc, Mutex};

use crate::domain::models::Location;

/// A location backed by an in-memory history stack. Clones share the stack,
/// so a caller can keep a handle after boxing one into the session manager.
#[derive(Clone)]
pub struct MemoryLocation {
    history: Arc<Mutex<Vec<String>>>,
}

impl MemoryLocation {
    pub fn new(href: &str) -> MemoryLocation {
        return MemoryLocation {
            history: Arc::new(Mutex::new(vec![href.to_string()])),
        };
    }

    pub fn history(&self) -> Vec<String> {
        return self.history.lock().unwrap_or_else(|e| e.into_inner()).clone();
    }
}

impl Location for MemoryLocation {
    fn href(&self) -> String {
        return self
            .history
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .last()
            .cloned()
            .unwrap_or_default();
    }

    fn replace(&mut self, href: &str) {
        let mut history = self.history.lock().unwrap_or_else(|e| e.into_inner());
        match history.last_mut() {
            Some(current) => *current = href.to_string(),
            None => history.push(href.to_string()),
        }
    }

    fn assign(&mut self, href: &str) {
        self.history
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(href.to_string());
    }
}
