//! Durable key-value storage and screen navigation.

use std::{
    collections::BTreeMap,
    fs, io,
    path::{Path, PathBuf},
    sync::{Arc, Mutex},
};

use tracing::{debug, warn};

use crate::{error::StoreError, types::Screen};

/// Key the active screen identifier is persisted under.
pub const SCREEN_KEY: &str = "currentPage";

/// String key-value storage surviving restarts.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError>;
}

/// Volatile store, clones share the same entries.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    entries: Arc<Mutex<BTreeMap<String, String>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn entries(&self) -> std::sync::MutexGuard<'_, BTreeMap<String, String>> {
        self.entries.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.entries().get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.entries().insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// JSON object on disk, rewritten as a whole on every update.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    entries: BTreeMap<String, String>,
}

impl FileStore {
    /// Opens the store at `path`.
    ///
    /// Starts empty if the file does not exist, can not be read or is not a
    /// JSON object of strings. The file is rewritten on the next update.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let entries = Self::load(&path).unwrap_or_else(|e| {
            warn!(%e, "discarding unreadable store");
            BTreeMap::new()
        });
        debug!(path = %path.display(), entries = entries.len(), "store opened");
        Self { path, entries }
    }

    fn load(path: &Path) -> Result<BTreeMap<String, String>, StoreError> {
        match fs::read(path) {
            Ok(bytes) => Ok(serde_json::from_slice(&bytes)?),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(BTreeMap::new()),
            Err(source) => Err(StoreError::Io {
                path: path.to_path_buf(),
                source,
            }),
        }
    }

    /// `<platform data dir>/p2p-desk/state.json`.
    pub fn default_path() -> Result<PathBuf, StoreError> {
        dirs::data_dir()
            .map(|dir| dir.join("p2p-desk").join("state.json"))
            .ok_or(StoreError::NoDataDir)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn persist(&self) -> Result<(), StoreError> {
        let io_err = |source| StoreError::Io {
            path: self.path.clone(),
            source,
        };
        if let Some(dir) = self.path.parent() {
            fs::create_dir_all(dir).map_err(io_err)?;
        }
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, serde_json::to_vec_pretty(&self.entries)?).map_err(io_err)?;
        fs::rename(&tmp, &self.path).map_err(io_err)
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        if self.entries.get(key).is_some_and(|v| v == value) {
            return Ok(());
        }
        self.entries.insert(key.to_string(), value.to_string());
        self.persist()
    }
}

/// Active top-level screen, persisted in a [`KeyValueStore`].
#[derive(Debug)]
pub struct Navigator<S> {
    store: S,
    current: Screen,
}

impl<S: KeyValueStore> Navigator<S> {
    /// Restores the last active screen. Missing, unknown or unreadable
    /// values fall back to [`Screen::Home`].
    pub fn restore(store: S) -> Self {
        let current = match store.get(SCREEN_KEY) {
            Ok(Some(id)) => id.parse().unwrap_or_else(|e| {
                warn!(%e, "unknown persisted screen, falling back to home");
                Screen::Home
            }),
            Ok(None) => Screen::Home,
            Err(e) => {
                warn!(%e, "failed to read persisted screen, falling back to home");
                Screen::Home
            }
        };
        debug!(%current, "navigation restored");
        Self { store, current }
    }

    pub fn current(&self) -> Screen {
        self.current
    }

    /// Switches to `screen` and persists it. The switch takes effect even if
    /// persisting fails.
    pub fn navigate(&mut self, screen: Screen) -> Result<(), StoreError> {
        self.current = screen;
        self.store.set(SCREEN_KEY, screen.id())
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}
