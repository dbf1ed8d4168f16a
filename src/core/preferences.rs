//! # Preference Store
//!
//! A tiny key-value capability for durable UI preferences. Only two keys are
//! used today ([`THEME_KEY`] and [`THEME_EXPLICIT_KEY`]).
//!
//! Two implementations:
//! - [`FilePreferenceStore`]: a flat TOML table at `~/.parley/preferences.toml`.
//!   Writes go through `.tmp` + `rename()` so a crash never leaves a torn file.
//! - [`MemoryPreferenceStore`]: process-lifetime only; cheap to clone and share.

use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use log::{debug, info, warn};

pub const THEME_KEY: &str = "theme";
pub const THEME_EXPLICIT_KEY: &str = "theme-explicit";

#[derive(Debug)]
pub enum PreferenceError {
    Io(io::Error),
    Serialize(toml::ser::Error),
}

impl fmt::Display for PreferenceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PreferenceError::Io(e) => write!(f, "preference I/O error: {e}"),
            PreferenceError::Serialize(e) => write!(f, "preference encode error: {e}"),
        }
    }
}

impl std::error::Error for PreferenceError {}

impl From<io::Error> for PreferenceError {
    fn from(e: io::Error) -> Self {
        PreferenceError::Io(e)
    }
}

pub trait PreferenceStore: Send {
    fn get(&self, key: &str) -> Option<String>;

    fn set(&mut self, key: &str, value: &str) -> Result<(), PreferenceError>;

    /// Write several keys as one unit.
    ///
    /// The default writes them one by one; stores with a backing file
    /// override this to commit a single snapshot.
    fn set_all(&mut self, entries: &[(&str, &str)]) -> Result<(), PreferenceError> {
        for (key, value) in entries {
            self.set(key, value)?;
        }
        Ok(())
    }
}

// ============================================================================
// In-memory store
// ============================================================================

/// Shared in-memory store. Clones see the same entries.
#[derive(Debug, Clone, Default)]
pub struct MemoryPreferenceStore {
    entries: Arc<Mutex<BTreeMap<String, String>>>,
}

impl MemoryPreferenceStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entries(entries: &[(&str, &str)]) -> Self {
        let store = Self::new();
        if let Ok(mut map) = store.entries.lock() {
            for (key, value) in entries {
                map.insert(key.to_string(), value.to_string());
            }
        }
        store
    }
}

impl PreferenceStore for MemoryPreferenceStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.lock().ok()?.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), PreferenceError> {
        // A poisoned lock only means another holder panicked mid-insert.
        let mut map = self
            .entries
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        map.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

// ============================================================================
// File-backed store
// ============================================================================

/// TOML-file store. Entries are read once on open and cached.
#[derive(Debug)]
pub struct FilePreferenceStore {
    path: PathBuf,
    entries: BTreeMap<String, String>,
}

impl FilePreferenceStore {
    /// Open (or lazily create) the store at `path`.
    ///
    /// A missing file yields an empty store. A malformed file is logged and
    /// treated as empty; it is replaced on the next write.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let entries = match fs::read_to_string(&path) {
            Ok(contents) => match toml::from_str::<BTreeMap<String, String>>(&contents) {
                Ok(entries) => {
                    info!("Loaded preferences from {}", path.display());
                    entries
                }
                Err(e) => {
                    warn!("Ignoring malformed preferences {}: {}", path.display(), e);
                    BTreeMap::new()
                }
            },
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!("No preferences file at {}", path.display());
                BTreeMap::new()
            }
            Err(e) => {
                warn!("Failed to read preferences {}: {}", path.display(), e);
                BTreeMap::new()
            }
        };
        Self { path, entries }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn flush(&self) -> Result<(), PreferenceError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let contents = toml::to_string(&self.entries).map_err(PreferenceError::Serialize)?;
        let tmp_path = self.path.with_extension("tmp");
        fs::write(&tmp_path, contents)?;
        fs::rename(&tmp_path, &self.path)?;
        debug!("Preferences written to {}", self.path.display());
        Ok(())
    }
}

impl PreferenceStore for FilePreferenceStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), PreferenceError> {
        self.set_all(&[(key, value)])
    }

    fn set_all(&mut self, entries: &[(&str, &str)]) -> Result<(), PreferenceError> {
        let previous = self.entries.clone();
        for (key, value) in entries {
            self.entries.insert(key.to_string(), value.to_string());
        }
        if let Err(e) = self.flush() {
            // Keep memory consistent with what's on disk.
            self.entries = previous;
            return Err(e);
        }
        Ok(())
    }
}
