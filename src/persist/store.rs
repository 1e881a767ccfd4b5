//! Key/value integer storage supplied by the host.
//!
//! The game only ever reads and writes a single key, but the capability is
//! kept generic so a different backend can be dropped in.

use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to access score file {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("score file {path} is malformed")]
    Malformed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("persistent storage is unavailable")]
    Unavailable,
}

/// Persisted integers addressed by key
pub trait ScoreStore {
    /// `Ok(None)` when the key has never been written
    fn get_persisted_int(&self, key: &str) -> Result<Option<i64>, StoreError>;

    fn set_persisted_int(&mut self, key: &str, value: i64) -> Result<(), StoreError>;
}

/// Integers kept in a small JSON object on disk, e.g. `{"highScore": 12}`
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_all(&self) -> Result<BTreeMap<String, i64>, StoreError> {
        let text = match std::fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(BTreeMap::new()),
            Err(source) => {
                return Err(StoreError::Io {
                    path: self.path.clone(),
                    source,
                });
            }
        };

        serde_json::from_str(&text).map_err(|source| StoreError::Malformed {
            path: self.path.clone(),
            source,
        })
    }
}

impl ScoreStore for JsonFileStore {
    fn get_persisted_int(&self, key: &str) -> Result<Option<i64>, StoreError> {
        Ok(self.read_all()?.get(key).copied())
    }

    fn set_persisted_int(&mut self, key: &str, value: i64) -> Result<(), StoreError> {
        // A corrupt file is replaced rather than blocking every future save
        let mut values = match self.read_all() {
            Ok(values) => values,
            Err(StoreError::Malformed { .. }) => BTreeMap::new(),
            Err(e) => return Err(e),
        };
        values.insert(key.to_string(), value);

        let io_err = |source| StoreError::Io {
            path: self.path.clone(),
            source,
        };

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(io_err)?;
            }
        }

        let json = serde_json::to_string_pretty(&values).map_err(|source| {
            StoreError::Malformed {
                path: self.path.clone(),
                source,
            }
        })?;
        std::fs::write(&self.path, json).map_err(io_err)
    }
}

/// Non-persistent store, used with `--no-persist` and in tests
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: HashMap<String, i64>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ScoreStore for MemoryStore {
    fn get_persisted_int(&self, key: &str) -> Result<Option<i64>, StoreError> {
        Ok(self.values.get(key).copied())
    }

    fn set_persisted_int(&mut self, key: &str, value: i64) -> Result<(), StoreError> {
        self.values.insert(key.to_string(), value);
        Ok(())
    }
}
