use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

use managersol_application::SessionStore;
use managersol_core::{AppError, AppResult};
use tracing::warn;

/// Durable key-value session store persisted as one JSON file.
///
/// Fills the role browser local storage plays for the web client: a small
/// string-to-string map that survives restarts. A missing or malformed
/// file starts the store empty rather than failing, matching the session
/// model's "malformed means absent" rule.
pub struct FileSessionStore {
    path: PathBuf,
    entries: RwLock<HashMap<String, String>>,
}

impl FileSessionStore {
    /// Opens the store at `path`, loading any existing entries.
    #[must_use]
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let entries = Self::load(path.as_path());
        Self {
            path,
            entries: RwLock::new(entries),
        }
    }

    fn load(path: &Path) -> HashMap<String, String> {
        let Ok(raw) = fs::read_to_string(path) else {
            return HashMap::new();
        };
        match serde_json::from_str(raw.as_str()) {
            Ok(entries) => entries,
            Err(error) => {
                warn!(path = %path.display(), error = %error, "session file unreadable, starting empty");
                HashMap::new()
            }
        }
    }

    fn persist(&self, entries: &HashMap<String, String>) -> AppResult<()> {
        let encoded = serde_json::to_string_pretty(entries).map_err(|error| {
            AppError::Internal(format!("failed to encode session file: {error}"))
        })?;
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|error| {
                AppError::Internal(format!("failed to create session directory: {error}"))
            })?;
        }
        fs::write(self.path.as_path(), encoded).map_err(|error| {
            AppError::Internal(format!("failed to write session file: {error}"))
        })
    }
}

impl SessionStore for FileSessionStore {
    fn get(&self, key: &str) -> AppResult<Option<String>> {
        Ok(self
            .entries
            .read()
            .map_err(|_| AppError::Internal("session store lock poisoned".to_owned()))?
            .get(key)
            .cloned())
    }

    fn put(&self, key: &str, value: &str) -> AppResult<()> {
        let mut entries = self
            .entries
            .write()
            .map_err(|_| AppError::Internal("session store lock poisoned".to_owned()))?;
        entries.insert(key.to_owned(), value.to_owned());
        self.persist(&entries)
    }

    fn remove(&self, key: &str) -> AppResult<()> {
        let mut entries = self
            .entries
            .write()
            .map_err(|_| AppError::Internal("session store lock poisoned".to_owned()))?;
        if entries.remove(key).is_none() {
            return Ok(());
        }
        self.persist(&entries)
    }
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::PathBuf;

    use managersol_application::SessionStore;

    use super::FileSessionStore;

    fn scratch_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("managersol-store-{name}-{}", std::process::id()))
    }

    #[test]
    fn values_survive_reopening_the_store() {
        let path = scratch_path("reopen");
        let _ = fs::remove_file(&path);

        let store = FileSessionStore::open(&path);
        assert!(store.put("authUser", "{\"id\":\"u-1\"}").is_ok());
        drop(store);

        let reopened = FileSessionStore::open(&path);
        let value = reopened.get("authUser");
        assert!(value.is_ok_and(|value| value.as_deref() == Some("{\"id\":\"u-1\"}")));
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn malformed_file_starts_the_store_empty() {
        let path = scratch_path("malformed");
        assert!(fs::write(&path, "not json at all").is_ok());

        let store = FileSessionStore::open(&path);
        let value = store.get("authUser");
        assert!(value.is_ok_and(|value| value.is_none()));
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn removing_a_missing_key_is_a_noop() {
        let path = scratch_path("remove");
        let _ = fs::remove_file(&path);

        let store = FileSessionStore::open(&path);
        assert!(store.remove("companyId").is_ok());
        let _ = fs::remove_file(&path);
    }
}
