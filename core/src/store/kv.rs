use crate::prelude::{AnalysisError, PipelineResult};
use std::collections::HashMap;
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};
use tempfile::NamedTempFile;

/// String key/value backend in the shape of browser local storage.
///
/// No transactions, expiry or capacity bound; concurrent writers race and the
/// last write wins.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> PipelineResult<Option<String>>;
    fn set(&self, key: &str, value: &str) -> PipelineResult<()>;
    fn remove(&self, key: &str) -> PipelineResult<()>;
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for Arc<T> {
    fn get(&self, key: &str) -> PipelineResult<Option<String>> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> PipelineResult<()> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> PipelineResult<()> {
        (**self).remove(key)
    }
}

#[derive(Default)]
pub struct MemoryStore {
    entries: RwLock<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.read().map(|entries| entries.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn poisoned() -> AnalysisError {
    AnalysisError::Store("memory store lock poisoned".into())
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> PipelineResult<Option<String>> {
        let entries = self.entries.read().map_err(|_| poisoned())?;
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> PipelineResult<()> {
        let mut entries = self.entries.write().map_err(|_| poisoned())?;
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> PipelineResult<()> {
        let mut entries = self.entries.write().map_err(|_| poisoned())?;
        entries.remove(key);
        Ok(())
    }
}

/// One `<key>.json` file per entry under a root directory.
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    pub fn open<P: AsRef<Path>>(root: P) -> PipelineResult<Self> {
        let root = root.as_ref().to_path_buf();
        fs::create_dir_all(&root).map_err(|err| {
            AnalysisError::Store(format!("creating store dir {}: {}", root.display(), err))
        })?;
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Keys are percent-encoded into file names, so any non-empty key maps to
    /// exactly one file directly under the root.
    fn path_for(&self, key: &str) -> PipelineResult<PathBuf> {
        if key.is_empty() {
            return Err(AnalysisError::InvalidInput("store key is empty".into()));
        }
        Ok(self
            .root
            .join(format!("{}.json", urlencoding::encode(key))))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> PipelineResult<Option<String>> {
        let path = self.path_for(key)?;
        match fs::read_to_string(&path) {
            Ok(contents) => Ok(Some(contents)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(AnalysisError::Store(format!(
                "reading {}: {}",
                path.display(),
                err
            ))),
        }
    }

    fn set(&self, key: &str, value: &str) -> PipelineResult<()> {
        let path = self.path_for(key)?;
        let write_err =
            |err: std::io::Error| AnalysisError::Store(format!("writing {}: {}", path.display(), err));
        let mut staging = NamedTempFile::new_in(&self.root).map_err(write_err)?;
        staging.write_all(value.as_bytes()).map_err(write_err)?;
        staging
            .persist(&path)
            .map_err(|err| write_err(err.error))?;
        Ok(())
    }

    fn remove(&self, key: &str) -> PipelineResult<()> {
        let path = self.path_for(key)?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
            Err(err) => Err(AnalysisError::Store(format!(
                "removing {}: {}",
                path.display(),
                err
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn memory_store_overwrites_and_removes() {
        let store = MemoryStore::new();
        store.set("analysis_a", "1").unwrap();
        store.set("analysis_a", "2").unwrap();
        assert_eq!(store.get("analysis_a").unwrap().as_deref(), Some("2"));
        assert_eq!(store.len(), 1);
        store.remove("analysis_a").unwrap();
        assert!(store.get("analysis_a").unwrap().is_none());
        assert!(store.is_empty());
    }

    #[test]
    fn file_store_persists_across_handles() {
        let dir = tempdir().unwrap();
        FileStore::open(dir.path())
            .unwrap()
            .set("cricket_analysis_cricket-1-abc", "{}")
            .unwrap();

        let reopened = FileStore::open(dir.path()).unwrap();
        assert_eq!(
            reopened
                .get("cricket_analysis_cricket-1-abc")
                .unwrap()
                .as_deref(),
            Some("{}")
        );
        assert!(reopened.get("analysis_missing").unwrap().is_none());
        reopened.remove("analysis_missing").unwrap();
    }

    #[test]
    fn file_store_keeps_arbitrary_keys_inside_root() {
        let dir = tempdir().unwrap();
        let store = FileStore::open(dir.path()).unwrap();
        assert!(store.get("analysis_session.1").unwrap().is_none());
        store.remove("../escape").unwrap();

        for key in ["../escape", "analysis_session.1", "analysis_a/b c", "analysis_é"] {
            store.set(key, key).unwrap();
            assert_eq!(store.get(key).unwrap().as_deref(), Some(key));
        }
        assert!(!dir.path().parent().unwrap().join("escape.json").exists());
        let files = fs::read_dir(dir.path()).unwrap().count();
        assert_eq!(files, 4);
        assert!(store.get("").is_err());
    }

    #[test]
    fn concurrent_writers_to_one_key_all_succeed() {
        let dir = tempdir().unwrap();
        let store = Arc::new(FileStore::open(dir.path()).unwrap());
        let writers: Vec<_> = (0..8)
            .map(|n| {
                let store = store.clone();
                std::thread::spawn(move || {
                    for round in 0..25 {
                        store
                            .set("analysis_shared", &format!("{}-{}", n, round))
                            .unwrap();
                    }
                })
            })
            .collect();
        for writer in writers {
            writer.join().unwrap();
        }
        let last = store.get("analysis_shared").unwrap().unwrap();
        assert!(last.ends_with("-24"));
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 1);
    }
}
