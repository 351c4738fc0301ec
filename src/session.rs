//! Persisted session: the last logged-in username, kept under a fixed key.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::app_dirs;

/// File holding the persisted session inside the app directory.
pub const SESSION_FILE_NAME: &str = "session.toml";

#[derive(Debug, thiserror::Error)]
pub enum SessionStoreError {
    #[error("App dir error: {0}")]
    AppDir(#[from] app_dirs::AppDirError),
    #[error("Failed to read session at {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to write session at {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to remove session at {path}: {source}")]
    Remove {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Session file {path} is corrupt: {source}")]
    Decode {
        path: PathBuf,
        source: toml::de::Error,
    },
    #[error("Failed to encode session: {0}")]
    Encode(#[from] toml::ser::Error),
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct SessionFile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    username: Option<String>,
}

/// Reads and writes the `username` key of the session file.
#[derive(Clone, Debug)]
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    /// Store backed by `session.toml` in the app directory.
    pub fn new() -> Result<Self, SessionStoreError> {
        Ok(Self::with_path(app_dirs::app_file(SESSION_FILE_NAME)?))
    }

    pub fn with_path(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Return the stored username, if any. Blank values count as absent.
    pub fn load(&self) -> Result<Option<String>, SessionStoreError> {
        if !self.path.exists() {
            return Ok(None);
        }
        let text = std::fs::read_to_string(&self.path).map_err(|source| SessionStoreError::Read {
            path: self.path.clone(),
            source,
        })?;
        let file: SessionFile =
            toml::from_str(&text).map_err(|source| SessionStoreError::Decode {
                path: self.path.clone(),
                source,
            })?;
        Ok(file
            .username
            .map(|name| name.trim().to_string())
            .filter(|name| !name.is_empty()))
    }

    pub fn save(&self, username: &str) -> Result<(), SessionStoreError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(|source| SessionStoreError::Write {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        let data = toml::to_string(&SessionFile {
            username: Some(username.to_string()),
        })?;
        crate::config::atomic_write(&self.path, data.as_bytes()).map_err(|source| {
            SessionStoreError::Write {
                path: self.path.clone(),
                source,
            }
        })
    }

    /// Remove the persisted session; a missing file is not an error.
    pub fn clear(&self) -> Result<(), SessionStoreError> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(source) => Err(SessionStoreError::Remove {
                path: self.path.clone(),
                source,
            }),
        }
    }
}
