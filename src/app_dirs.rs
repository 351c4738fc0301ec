//! Where the Deeptone client keeps its files on disk.
//!
//! `config.toml`, `session.toml` and the `logs/` folder sit side by side in a
//! `.deeptone` folder under the OS config directory. Set `DEEPTONE_CONFIG_HOME`
//! to put that folder somewhere else.

use std::{
    path::PathBuf,
    sync::{LazyLock, Mutex},
};

use directories::BaseDirs;
use thiserror::Error;

/// Folder created under the config root to hold every client file.
pub const APP_DIR_NAME: &str = ".deeptone";

/// Environment variable that replaces the OS config root.
pub const CONFIG_HOME_ENV: &str = "DEEPTONE_CONFIG_HOME";

const LOGS_DIR_NAME: &str = "logs";

static CONFIG_BASE_OVERRIDE: LazyLock<Mutex<Option<PathBuf>>> = LazyLock::new(|| Mutex::new(None));

#[derive(Debug, Error)]
pub enum AppDirError {
    #[error("Cannot locate a config directory; set {CONFIG_HOME_ENV}")]
    NoBaseDir,
    #[error("Failed to create client directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// The `.deeptone` folder, created on first use.
pub fn app_root_dir() -> Result<PathBuf, AppDirError> {
    let base = config_base_dir().ok_or(AppDirError::NoBaseDir)?;
    ensure_dir(base.join(APP_DIR_NAME))
}

/// Path of a top-level client file such as `config.toml`. The file itself is not created.
pub fn app_file(name: &str) -> Result<PathBuf, AppDirError> {
    Ok(app_root_dir()?.join(name))
}

/// Folder holding one log file per launch.
pub fn logs_dir() -> Result<PathBuf, AppDirError> {
    ensure_dir(app_root_dir()?.join(LOGS_DIR_NAME))
}

fn ensure_dir(path: PathBuf) -> Result<PathBuf, AppDirError> {
    match std::fs::create_dir_all(&path) {
        Ok(()) => Ok(path),
        Err(source) => Err(AppDirError::CreateDir { path, source }),
    }
}

fn config_base_dir() -> Option<PathBuf> {
    let overridden = CONFIG_BASE_OVERRIDE
        .lock()
        .ok()
        .and_then(|guard| guard.clone());
    overridden
        .or_else(|| std::env::var_os(CONFIG_HOME_ENV).map(PathBuf::from))
        .or_else(|| BaseDirs::new().map(|dirs| dirs.config_dir().to_path_buf()))
}

/// Points [`app_root_dir`] below `path` for one test; dropping it restores the real root.
#[cfg(test)]
pub(crate) struct ConfigBaseGuard {
    _serial: std::sync::MutexGuard<'static, ()>,
}

#[cfg(test)]
static OVERRIDE_SERIAL: Mutex<()> = Mutex::new(());

#[cfg(test)]
impl ConfigBaseGuard {
    pub(crate) fn set(path: impl Into<PathBuf>) -> Self {
        let serial = OVERRIDE_SERIAL
            .lock()
            .unwrap_or_else(|err| err.into_inner());
        let mut guard = CONFIG_BASE_OVERRIDE
            .lock()
            .expect("config base override mutex poisoned");
        *guard = Some(path.into());
        Self { _serial: serial }
    }
}

#[cfg(test)]
impl Drop for ConfigBaseGuard {
    fn drop(&mut self) {
        if let Ok(mut guard) = CONFIG_BASE_OVERRIDE.lock() {
            *guard = None;
        }
    }
}
