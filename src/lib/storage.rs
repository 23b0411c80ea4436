//! Durable key/value storage behind the session store and the pending
//! registration marker. The browser build uses `localStorage`; host builds keep
//! a JSON document on disk so state survives a restart. Values may contain
//! bearer tokens: never log them.

use super::errors::AppError;
use std::{
    collections::BTreeMap,
    sync::{Mutex, PoisonError},
};

/// Minimal persistent string map. Implementations must be safe to share across
/// the reactive runtime, hence `Send + Sync`.
pub trait KeyValueStore: Send + Sync {
    /// # Errors
    /// Returns `AppError::Storage` if the backing store cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, AppError>;

    /// # Errors
    /// Returns `AppError::Storage` if the value cannot be written.
    fn set(&self, key: &str, value: &str) -> Result<(), AppError>;

    /// Removing a missing key is not an error.
    ///
    /// # Errors
    /// Returns `AppError::Storage` if the backing store cannot be written.
    fn remove(&self, key: &str) -> Result<(), AppError>;
}

fn poisoned<T>(_: PoisonError<T>) -> AppError {
    AppError::Storage("storage lock poisoned".to_string())
}

/// Process-local store; state is lost on restart.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<BTreeMap<String, String>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, AppError> {
        let entries = self.entries.lock().map_err(poisoned)?;
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), AppError> {
        let mut entries = self.entries.lock().map_err(poisoned)?;
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), AppError> {
        let mut entries = self.entries.lock().map_err(poisoned)?;
        entries.remove(key);
        Ok(())
    }
}

#[cfg(not(target_arch = "wasm32"))]
pub use file::FileStore;

#[cfg(not(target_arch = "wasm32"))]
mod file {
    use super::{AppError, KeyValueStore, poisoned};
    use std::{
        collections::BTreeMap,
        fs,
        io::ErrorKind,
        path::{Path, PathBuf},
        sync::Mutex,
    };
    use tracing::debug;

    /// Stores every key in a single JSON object on disk. Writes go to a sibling
    /// temporary file first and are renamed into place.
    #[derive(Debug)]
    pub struct FileStore {
        path: PathBuf,
        lock: Mutex<()>,
    }

    impl FileStore {
        pub fn new(path: impl Into<PathBuf>) -> Self {
            Self {
                path: path.into(),
                lock: Mutex::new(()),
            }
        }

        #[must_use]
        pub fn path(&self) -> &Path {
            &self.path
        }

        fn read_all(&self) -> Result<BTreeMap<String, String>, AppError> {
            match fs::read_to_string(&self.path) {
                Ok(contents) if contents.trim().is_empty() => Ok(BTreeMap::new()),
                Ok(contents) => serde_json::from_str(&contents).map_err(|err| {
                    AppError::Storage(format!(
                        "Failed to parse {}: {err}",
                        self.path.display()
                    ))
                }),
                Err(err) if err.kind() == ErrorKind::NotFound => Ok(BTreeMap::new()),
                Err(err) => Err(AppError::Storage(format!(
                    "Failed to read {}: {err}",
                    self.path.display()
                ))),
            }
        }

        fn write_all(&self, entries: &BTreeMap<String, String>) -> Result<(), AppError> {
            if let Some(parent) = self.path.parent() {
                if !parent.as_os_str().is_empty() {
                    fs::create_dir_all(parent).map_err(|err| {
                        AppError::Storage(format!(
                            "Failed to create {}: {err}",
                            parent.display()
                        ))
                    })?;
                }
            }

            let payload = serde_json::to_string_pretty(entries)
                .map_err(|err| AppError::Storage(format!("Failed to encode store: {err}")))?;
            let staging = self.path.with_extension("tmp");
            fs::write(&staging, payload).map_err(|err| {
                AppError::Storage(format!("Failed to write {}: {err}", staging.display()))
            })?;
            fs::rename(&staging, &self.path).map_err(|err| {
                AppError::Storage(format!("Failed to replace {}: {err}", self.path.display()))
            })?;

            debug!(path = %self.path.display(), keys = entries.len(), "store persisted");
            Ok(())
        }
    }

    impl KeyValueStore for FileStore {
        fn get(&self, key: &str) -> Result<Option<String>, AppError> {
            let _guard = self.lock.lock().map_err(poisoned)?;
            Ok(self.read_all()?.remove(key))
        }

        fn set(&self, key: &str, value: &str) -> Result<(), AppError> {
            let _guard = self.lock.lock().map_err(poisoned)?;
            let mut entries = self.read_all()?;
            entries.insert(key.to_string(), value.to_string());
            self.write_all(&entries)
        }

        fn remove(&self, key: &str) -> Result<(), AppError> {
            let _guard = self.lock.lock().map_err(poisoned)?;
            let mut entries = self.read_all()?;
            if entries.remove(key).is_none() {
                return Ok(());
            }
            self.write_all(&entries)
        }
    }
}

#[cfg(target_arch = "wasm32")]
pub use browser::BrowserStore;

#[cfg(target_arch = "wasm32")]
mod browser {
    use super::{AppError, KeyValueStore};
    use web_sys::Storage;

    /// `window.localStorage`. The handle is looked up per call so the store
    /// itself stays `Send + Sync`.
    #[derive(Clone, Copy, Debug, Default)]
    pub struct BrowserStore;

    fn local_storage() -> Result<Storage, AppError> {
        web_sys::window()
            .ok_or_else(|| AppError::Storage("No window available.".to_string()))?
            .local_storage()
            .map_err(|_| AppError::Storage("Local storage is blocked.".to_string()))?
            .ok_or_else(|| AppError::Storage("Local storage is unavailable.".to_string()))
    }

    impl KeyValueStore for BrowserStore {
        fn get(&self, key: &str) -> Result<Option<String>, AppError> {
            local_storage()?
                .get_item(key)
                .map_err(|_| AppError::Storage(format!("Failed to read {key}.")))
        }

        fn set(&self, key: &str, value: &str) -> Result<(), AppError> {
            local_storage()?
                .set_item(key, value)
                .map_err(|_| AppError::Storage(format!("Failed to write {key}.")))
        }

        fn remove(&self, key: &str) -> Result<(), AppError> {
            local_storage()?
                .remove_item(key)
                .map_err(|_| AppError::Storage(format!("Failed to remove {key}.")))
        }
    }
}
