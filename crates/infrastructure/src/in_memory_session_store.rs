use std::collections::HashMap;
use std::sync::RwLock;

use managersol_application::SessionStore;
use managersol_core::{AppError, AppResult};

/// In-memory session store.
///
/// Serves as the session-scoped store (cleared with the process) and as a
/// test double for the durable one.
#[derive(Debug, Default)]
pub struct InMemorySessionStore {
    entries: RwLock<HashMap<String, String>>,
}

impl InMemorySessionStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
        }
    }
}

impl SessionStore for InMemorySessionStore {
    fn get(&self, key: &str) -> AppResult<Option<String>> {
        Ok(self
            .entries
            .read()
            .map_err(|_| AppError::Internal("session store lock poisoned".to_owned()))?
            .get(key)
            .cloned())
    }

    fn put(&self, key: &str, value: &str) -> AppResult<()> {
        self.entries
            .write()
            .map_err(|_| AppError::Internal("session store lock poisoned".to_owned()))?
            .insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    fn remove(&self, key: &str) -> AppResult<()> {
        self.entries
            .write()
            .map_err(|_| AppError::Internal("session store lock poisoned".to_owned()))?
            .remove(key);
        Ok(())
    }
}
