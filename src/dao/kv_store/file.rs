//! Directory-backed store writing one JSON document per key.

use std::{
    fs,
    io::{self, ErrorKind},
    path::PathBuf,
};

use tracing::{debug, info};

use crate::dao::{
    kv_store::KeyValueStore,
    storage::{StorageError, StorageResult},
};

/// Stores each key as `<dir>/<key>.json`.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Open the store, creating the directory when needed.
    pub fn open(dir: impl Into<PathBuf>) -> StorageResult<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir).map_err(|source| {
            StorageError::unavailable(format!("cannot create `{}`", dir.display()), source)
        })?;
        info!(dir = %dir.display(), "file store ready");
        Ok(Self { dir })
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        let path = self.path_for(key);
        match fs::read_to_string(&path) {
            Ok(contents) => Ok(Some(contents)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(StorageError::unavailable(
                format!("cannot read `{}`", path.display()),
                err,
            )),
        }
    }

    fn set(&self, key: &str, value: String) -> StorageResult<()> {
        let path = self.path_for(key);
        let staging = self.dir.join(format!(".{key}.json.tmp"));

        // Write then rename so a crash never leaves a half-written document.
        fs::write(&staging, value)
            .and_then(|()| fs::rename(&staging, &path))
            .map_err(|source| {
                StorageError::unavailable(format!("cannot write `{}`", path.display()), source)
            })?;
        debug!(key, "document written");
        Ok(())
    }

    fn delete(&self, key: &str) -> StorageResult<()> {
        let path = self.path_for(key);
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
            Err(err) => Err(StorageError::unavailable(
                format!("cannot delete `{}`", path.display()),
                err,
            )),
        }
    }

    fn health_check(&self) -> StorageResult<()> {
        if self.dir.is_dir() {
            Ok(())
        } else {
            Err(StorageError::unavailable(
                format!("`{}` is not a directory", self.dir.display()),
                io::Error::from(ErrorKind::NotFound),
            ))
        }
    }
}
