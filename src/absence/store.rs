//! Durable storage for the last-activity timestamp.
use std::{
    fmt,
    fs::{self, create_dir_all},
    io,
    path::{Path, PathBuf},
};

#[derive(Debug)]
pub enum StoreError {
    Io { path: PathBuf, source: io::Error },
    Corrupt { path: PathBuf, contents: String },
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { path, source } => write!(f, "I/O error on {:?}: {}", path, source),
            Self::Corrupt { path, contents } => {
                write!(f, "{:?} does not hold a timestamp: {:?}", path, contents)
            }
        }
    }
}

impl std::error::Error for StoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Corrupt { .. } => None,
        }
    }
}

/// Persists a single float: seconds since the Unix epoch of the last user input.
pub trait ActivityStore: Send + Sync {
    /// `Ok(None)` when nothing has been saved yet or the record is empty.
    fn load(&self) -> Result<Option<f64>, StoreError>;

    fn save(&mut self, timestamp: f64) -> Result<(), StoreError>;
}

/// Plain-text file holding the timestamp as a decimal float.
#[derive(Debug, Clone)]
pub struct FileActivityStore {
    path: PathBuf,
}

impl FileActivityStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, source: io::Error) -> StoreError {
        StoreError::Io {
            path: self.path.clone(),
            source,
        }
    }
}

impl ActivityStore for FileActivityStore {
    fn load(&self) -> Result<Option<f64>, StoreError> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(self.io_error(err)),
        };

        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Ok(None);
        }
        match trimmed.parse::<f64>() {
            Ok(value) if value.is_finite() => Ok(Some(value)),
            _ => Err(StoreError::Corrupt {
                path: self.path.clone(),
                contents: trimmed.to_string(),
            }),
        }
    }

    fn save(&mut self, timestamp: f64) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                create_dir_all(parent).map_err(|err| self.io_error(err))?;
            }
        }
        fs::write(&self.path, timestamp.to_string()).map_err(|err| self.io_error(err))
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use std::sync::{Arc, Mutex};

    use super::*;

    #[derive(Debug, Default)]
    struct MemoryState {
        value: Option<f64>,
        saves: usize,
        fail_loads: bool,
        fail_saves: bool,
    }

    /// In-memory store; clones share state so tests can inspect saves.
    #[derive(Debug, Clone, Default)]
    pub struct MemoryActivityStore {
        state: Arc<Mutex<MemoryState>>,
    }

    impl MemoryActivityStore {
        pub fn with_value(value: f64) -> Self {
            let store = Self::default();
            store.state.lock().expect("store lock").value = Some(value);
            store
        }

        pub fn failing_loads() -> Self {
            let store = Self::default();
            store.state.lock().expect("store lock").fail_loads = true;
            store
        }

        pub fn failing_saves() -> Self {
            let store = Self::default();
            store.state.lock().expect("store lock").fail_saves = true;
            store
        }

        pub fn value(&self) -> Option<f64> {
            self.state.lock().expect("store lock").value
        }

        pub fn saves(&self) -> usize {
            self.state.lock().expect("store lock").saves
        }
    }

    impl ActivityStore for MemoryActivityStore {
        fn load(&self) -> Result<Option<f64>, StoreError> {
            let state = self.state.lock().expect("store lock");
            if state.fail_loads {
                return Err(StoreError::Corrupt {
                    path: PathBuf::from("memory"),
                    contents: "garbage".to_string(),
                });
            }
            Ok(state.value)
        }

        fn save(&mut self, timestamp: f64) -> Result<(), StoreError> {
            let mut state = self.state.lock().expect("store lock");
            if state.fail_saves {
                return Err(StoreError::Io {
                    path: PathBuf::from("memory"),
                    source: io::Error::new(io::ErrorKind::PermissionDenied, "read-only"),
                });
            }
            state.value = Some(timestamp);
            state.saves += 1;
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::{env, time::SystemTime};

    fn temp_path(label: &str) -> PathBuf {
        let unique_suffix = SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_nanos();
        env::temp_dir().join(format!("purrcafe_{}_{}", label, unique_suffix))
    }

    #[test]
    fn missing_file_loads_as_none() {
        let store = FileActivityStore::new(temp_path("missing").join("last_active.txt"));
        assert!(store.load().expect("missing file is not an error").is_none());
    }

    #[test]
    fn saved_timestamp_survives_a_new_store() {
        let dir = temp_path("roundtrip");
        let path = dir.join("last_active.txt");
        let mut store = FileActivityStore::new(&path);
        store.save(1_700_000_123.25).expect("save succeeds");

        let raw = fs::read_to_string(&path).expect("file written");
        assert_eq!(raw, "1700000123.25");

        let reopened = FileActivityStore::new(&path);
        assert_eq!(reopened.load().expect("load succeeds"), Some(1_700_000_123.25));

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn empty_file_loads_as_none() {
        let path = temp_path("empty");
        fs::write(&path, "  \n").expect("write fixture");

        let loaded = FileActivityStore::new(&path).load();
        assert!(matches!(loaded, Ok(None)));

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn unparsable_contents_are_reported_as_corrupt() {
        let path = temp_path("corrupt");
        fs::write(&path, "yesterday-ish\n").expect("write fixture");

        let err = FileActivityStore::new(&path).load().unwrap_err();
        assert!(matches!(err, StoreError::Corrupt { ref contents, .. } if contents == "yesterday-ish"));
        assert!(err.to_string().contains("yesterday-ish"));

        let _ = fs::remove_file(&path);
    }
}
