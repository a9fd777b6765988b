//! Persistence of the observation log.
//!
//! The log is stored as one pretty-printed JSON array of observation
//! records. Writes go to a sibling temp file which is synced and renamed
//! over the target, so a crash never leaves a half-written log behind.

use std::path::{Path, PathBuf};
use std::sync::Mutex;

use rollcast_common::Error;
use serde::Serialize;
use thiserror::Error;
use tracing::debug;

use crate::engine::Observation;

/// Explicit log file override.
pub const ENV_DATA_FILE: &str = "ROLLCAST_DATA";

const DIR_NAME: &str = "rollcast";
const LOG_FILE: &str = "log.json";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to resolve data dir (set {ENV_DATA_FILE} or XDG_DATA_HOME)")]
    DataDirUnavailable,

    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse JSON at {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("store lock poisoned")]
    Poisoned,
}

impl From<StoreError> for Error {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::DataDirUnavailable => Error::DataDirUnavailable,
            StoreError::Io { path, source } => Error::Io(std::io::Error::new(
                source.kind(),
                format!("{}: {}", path.display(), source),
            )),
            StoreError::Json { .. } | StoreError::Poisoned => {
                Error::StoreCorrupted(err.to_string())
            }
        }
    }
}

/// Storage backend for the observation log.
pub trait LogStore {
    /// Load the persisted sequence. A store that was never written is empty.
    fn load(&self) -> Result<Vec<Observation>, StoreError>;

    /// Replace the persisted sequence.
    fn save(&self, entries: &[Observation]) -> Result<(), StoreError>;
}

/// JSON file store.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        JsonFileStore { path: path.into() }
    }

    /// Open the store at the resolved default location.
    pub fn from_env(cli_path: Option<&Path>) -> Result<Self, StoreError> {
        Ok(Self::new(resolve_log_path(cli_path)?))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl LogStore for JsonFileStore {
    fn load(&self) -> Result<Vec<Observation>, StoreError> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "no log file yet");
                return Ok(Vec::new());
            }
            Err(e) => {
                return Err(StoreError::Io {
                    path: self.path.clone(),
                    source: e,
                })
            }
        };
        if content.trim().is_empty() {
            return Ok(Vec::new());
        }
        serde_json::from_str(&content).map_err(|e| StoreError::Json {
            path: self.path.clone(),
            source: e,
        })
    }

    fn save(&self, entries: &[Observation]) -> Result<(), StoreError> {
        write_json_pretty_atomic(&self.path, &entries)?;
        debug!(path = %self.path.display(), entries = entries.len(), "log saved");
        Ok(())
    }
}

/// In-memory store for tests and embedding.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<Vec<Observation>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entries(entries: Vec<Observation>) -> Self {
        MemoryStore {
            entries: Mutex::new(entries),
        }
    }
}

impl LogStore for MemoryStore {
    fn load(&self) -> Result<Vec<Observation>, StoreError> {
        self.entries
            .lock()
            .map(|entries| entries.clone())
            .map_err(|_| StoreError::Poisoned)
    }

    fn save(&self, entries: &[Observation]) -> Result<(), StoreError> {
        let mut guard = self.entries.lock().map_err(|_| StoreError::Poisoned)?;
        *guard = entries.to_vec();
        Ok(())
    }
}

/// Resolve the log file location.
///
/// 1. Explicit `--data` path
/// 2. ROLLCAST_DATA
/// 3. XDG_DATA_HOME/rollcast/log.json
/// 4. Platform data dir (dirs)
pub fn resolve_log_path(cli_path: Option<&Path>) -> Result<PathBuf, StoreError> {
    resolve_log_path_with(cli_path, |key| std::env::var(key).ok())
}

fn resolve_log_path_with<F>(cli_path: Option<&Path>, lookup: F) -> Result<PathBuf, StoreError>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(path) = cli_path {
        return Ok(path.to_path_buf());
    }

    if let Some(file) = lookup(ENV_DATA_FILE).filter(|v| !v.is_empty()) {
        return Ok(PathBuf::from(file));
    }

    if let Some(xdg) = lookup("XDG_DATA_HOME").filter(|v| !v.is_empty()) {
        return Ok(PathBuf::from(xdg).join(DIR_NAME).join(LOG_FILE));
    }

    if let Some(base) = dirs::data_dir() {
        return Ok(base.join(DIR_NAME).join(LOG_FILE));
    }

    Err(StoreError::DataDirUnavailable)
}

/// Serialize `value` and atomically replace `path` with it.
pub fn write_json_pretty_atomic<T: Serialize + ?Sized>(
    path: &Path,
    value: &T,
) -> Result<(), StoreError> {
    let content = serde_json::to_vec_pretty(value).map_err(|e| StoreError::Json {
        path: path.to_path_buf(),
        source: e,
    })?;
    write_bytes_atomic(path, &content)
}

/// Atomically replace `path` with `content`, creating parent directories.
pub fn write_bytes_atomic(path: &Path, content: &[u8]) -> Result<(), StoreError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| StoreError::Io {
            path: parent.to_path_buf(),
            source: e,
        })?;
    }
    let file_name = path
        .file_name()
        .and_then(|s| s.to_str())
        .unwrap_or(LOG_FILE);
    let tmp_path = path.with_file_name(format!("{}.tmp.{}", file_name, std::process::id()));
    {
        use std::io::Write;
        let mut file = std::fs::File::create(&tmp_path).map_err(|e| StoreError::Io {
            path: tmp_path.clone(),
            source: e,
        })?;
        if let Err(e) = file.write_all(content) {
            let _ = std::fs::remove_file(&tmp_path);
            return Err(StoreError::Io {
                path: tmp_path,
                source: e,
            });
        }
        let _ = file.sync_all();
    }
    if let Err(e) = std::fs::rename(&tmp_path, path) {
        let _ = std::fs::remove_file(&tmp_path);
        return Err(StoreError::Io {
            path: path.to_path_buf(),
            source: e,
        });
    }
    Ok(())
}
