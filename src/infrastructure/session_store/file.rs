use std::fs;
use std::path::{Path, PathBuf};

use super::SessionStore;
use crate::domain::{AccessError, Session};

/// Session store backed by a JSON file
///
/// Survives process restarts, the client-side equivalent of a page reload.
/// `set` writes to a temp file and renames it over the record so a concurrent
/// reader never observes a half-written session.
#[derive(Debug)]
pub struct FileSessionStore {
    path: PathBuf,
}

impl FileSessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn tmp_path(&self) -> PathBuf {
        self.path.with_extension("tmp")
    }
}

impl SessionStore for FileSessionStore {
    fn get(&self) -> Result<Option<Session>, AccessError> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(AccessError::storage(format!(
                    "Failed to read session file: {}",
                    e
                )))
            }
        };

        let session = serde_json::from_slice(&bytes).map_err(|e| {
            AccessError::storage(format!("Session file is not a valid record: {}", e))
        })?;

        Ok(Some(session))
    }

    fn set(&self, session: Session) -> Result<(), AccessError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                AccessError::storage(format!("Failed to create session directory: {}", e))
            })?;
        }

        let json = serde_json::to_vec_pretty(&session)
            .map_err(|e| AccessError::storage(format!("Failed to serialize session: {}", e)))?;

        let tmp = self.tmp_path();
        fs::write(&tmp, json)
            .map_err(|e| AccessError::storage(format!("Failed to write session file: {}", e)))?;

        fs::rename(&tmp, &self.path)
            .map_err(|e| AccessError::storage(format!("Failed to replace session file: {}", e)))
    }

    fn clear(&self) -> Result<(), AccessError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(AccessError::storage(format!(
                "Failed to remove session file: {}",
                e
            ))),
        }
    }
}
