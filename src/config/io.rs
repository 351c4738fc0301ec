use std::io::Write;
use std::path::{Path, PathBuf};

use crate::app_dirs;

use super::types::{AppSettings, ConfigError};
use super::{BACKEND_URL_ENV, CONFIG_FILE_NAME};

/// Resolve the configuration file path, ensuring the parent directory exists.
pub fn config_path() -> Result<PathBuf, ConfigError> {
    app_dirs::app_file(CONFIG_FILE_NAME).map_err(map_app_dir_error)
}

/// Load settings from the app directory, returning defaults if the file is missing.
///
/// `DEEPTONE_BACKEND_URL` wins over the stored base address.
pub fn load_or_default() -> Result<AppSettings, ConfigError> {
    let mut settings = load_from_path(&config_path()?)?;
    if let Ok(url) = std::env::var(BACKEND_URL_ENV) {
        settings.backend.base_url = url;
    }
    Ok(settings.normalized())
}

/// Load settings from a specific TOML file.
pub fn load_from_path(path: &Path) -> Result<AppSettings, ConfigError> {
    if !path.exists() {
        return Ok(AppSettings::default());
    }
    let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let settings: AppSettings = toml::from_str(&text).map_err(|source| ConfigError::ParseToml {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(settings.normalized())
}

/// Write settings to `path` as TOML, creating parent directories as needed.
pub fn save_to_path(settings: &AppSettings, path: &Path) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|source| ConfigError::CreateDir {
            path: parent.to_path_buf(),
            source,
        })?;
    }
    let data = toml::to_string_pretty(settings).map_err(|source| ConfigError::SerializeToml {
        path: path.to_path_buf(),
        source,
    })?;
    atomic_write(path, data.as_bytes()).map_err(|source| ConfigError::Write {
        path: path.to_path_buf(),
        source,
    })
}

/// Replace `path` with `data` via a sibling temp file and rename.
pub(crate) fn atomic_write(path: &Path, data: &[u8]) -> std::io::Result<()> {
    use rand::TryRngCore;
    let dir = path.parent().ok_or_else(|| {
        std::io::Error::new(std::io::ErrorKind::Other, "path has no parent directory")
    })?;
    let file_name = path
        .file_name()
        .ok_or_else(|| std::io::Error::new(std::io::ErrorKind::Other, "path has no file name"))?;

    let mut last_err = None;
    for _ in 0..5 {
        let mut bytes = [0u8; 6];
        rand::rngs::OsRng
            .try_fill_bytes(&mut bytes)
            .map_err(|err| std::io::Error::new(std::io::ErrorKind::Other, err.to_string()))?;
        let suffix: String = bytes.iter().map(|b| format!("{b:02x}")).collect();
        let tmp_path = dir.join(format!("{}.tmp-{suffix}", file_name.to_string_lossy()));

        let mut file = match std::fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&tmp_path)
        {
            Ok(file) => file,
            Err(err) if err.kind() == std::io::ErrorKind::AlreadyExists => {
                last_err = Some(err);
                continue;
            }
            Err(err) => return Err(err),
        };
        let written = file.write_all(data).and_then(|_| file.sync_all());
        drop(file);
        if let Err(err) = written.and_then(|_| replace_file(&tmp_path, path)) {
            let _ = std::fs::remove_file(&tmp_path);
            return Err(err);
        }
        return Ok(());
    }
    Err(last_err.unwrap_or_else(|| {
        std::io::Error::new(
            std::io::ErrorKind::AlreadyExists,
            "failed to create temporary file",
        )
    }))
}

fn replace_file(temp_path: &Path, path: &Path) -> std::io::Result<()> {
    match std::fs::rename(temp_path, path) {
        Ok(()) => Ok(()),
        Err(err) => {
            #[cfg(target_os = "windows")]
            if err.kind() == std::io::ErrorKind::AlreadyExists
                || err.kind() == std::io::ErrorKind::PermissionDenied
            {
                if let Err(inner) = std::fs::remove_file(path) {
                    if inner.kind() != std::io::ErrorKind::NotFound {
                        return Err(inner);
                    }
                }
                return std::fs::rename(temp_path, path);
            }
            Err(err)
        }
    }
}

fn map_app_dir_error(error: app_dirs::AppDirError) -> ConfigError {
    match error {
        app_dirs::AppDirError::NoBaseDir => ConfigError::NoConfigDir,
        app_dirs::AppDirError::CreateDir { path, source } => {
            ConfigError::CreateDir { path, source }
        }
    }
}
