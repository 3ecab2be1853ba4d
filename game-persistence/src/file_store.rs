use crate::store::DocumentStore;
use game_types::StoreError;
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Stores each document as `<dir>/<key>.json`.
///
/// Writes go to a temp file in the same directory and are renamed into place, so a crash
/// mid-write leaves the previous version of that document intact.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> Result<PathBuf, StoreError> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
        if !valid {
            return Err(StoreError::Unavailable(format!(
                "invalid document key '{}'",
                key
            )));
        }

        Ok(self.dir.join(format!("{}.json", key)))
    }
}

fn map_write_error(key: &str, err: std::io::Error) -> StoreError {
    if err.kind() == ErrorKind::StorageFull {
        StoreError::QuotaExceeded {
            key: key.to_string(),
        }
    } else {
        StoreError::Io(err)
    }
}

impl DocumentStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let path = self.path_for(key)?;
        match fs::read_to_string(&path) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StoreError::Io(e)),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        let path = self.path_for(key)?;
        fs::create_dir_all(&self.dir)?;

        let mut temp_file =
            NamedTempFile::new_in(&self.dir).map_err(|e| map_write_error(key, e))?;
        temp_file
            .write_all(value.as_bytes())
            .map_err(|e| map_write_error(key, e))?;
        temp_file
            .persist(&path)
            .map_err(|e| map_write_error(key, e.error))?;

        tracing::debug!("Wrote document '{}' ({} bytes)", key, value.len());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        let path = self.path_for(key)?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StoreError::Io(e)),
        }
    }
}
