//! Tracing output for the Deeptone client.
//!
//! Every launch logs to stdout and to its own `deeptone_<local time>.log` under
//! the client's `logs/` folder, so a failed upload or login can be traced after
//! the window is closed. Only the newest launches are kept.

use std::{
    fs::{self, OpenOptions},
    path::{Path, PathBuf},
    sync::OnceLock,
    time::SystemTime,
};

use time::{OffsetDateTime, UtcOffset, format_description::FormatItem, macros::format_description};
use tracing_appender::{non_blocking::WorkerGuard, rolling};
use tracing_subscriber::{EnvFilter, Registry, fmt, prelude::*};

use crate::app_dirs;

const KEEP_LAUNCH_LOGS: usize = 10;
const LOG_FILE_PREFIX: &str = "deeptone_";
/// Used when `RUST_LOG` is unset; keeps the HTTP client's per-request chatter out.
const DEFAULT_FILTER: &str = "info,ureq=warn";

static LOG_GUARD: OnceLock<WorkerGuard> = OnceLock::new();

#[derive(Debug, thiserror::Error)]
pub enum LoggingError {
    #[error("Log directory unavailable: {0}")]
    AppDir(#[from] app_dirs::AppDirError),
    #[error("Failed to list launch logs in {path}: {source}")]
    ReadDir {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to delete launch log {path}: {source}")]
    RemoveFile {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to name the launch log: {0}")]
    FormatTime(time::error::Format),
    #[error("A tracing subscriber is already installed: {0}")]
    SetGlobal(tracing::subscriber::SetGlobalDefaultError),
    #[error("Failed to create launch log {path}: {source}")]
    CreateLogFile {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Start logging for this launch. Calling it again does nothing.
///
/// `local_offset` must be resolved by `main` before any thread is spawned; it
/// stamps both the file name and each line.
pub fn init(local_offset: UtcOffset) -> Result<(), LoggingError> {
    if LOG_GUARD.get().is_some() {
        return Ok(());
    }

    let log_dir = app_dirs::logs_dir()?;
    let file_name = launch_log_name(OffsetDateTime::now_utc().to_offset(local_offset))?;
    let log_path = log_dir.join(&file_name);
    touch(&log_path)?;
    prune_launch_logs(&log_dir, KEEP_LAUNCH_LOGS)?;

    let (file_writer, guard) = tracing_appender::non_blocking(rolling::never(&log_dir, file_name));
    let timer = line_timer(local_offset);
    let subscriber = Registry::default()
        .with(env_filter())
        .with(
            fmt::layer()
                .with_timer(timer.clone())
                .with_writer(std::io::stdout),
        )
        .with(
            fmt::layer()
                .with_ansi(false)
                .with_timer(timer)
                .with_writer(file_writer),
        );
    tracing::subscriber::set_global_default(subscriber).map_err(LoggingError::SetGlobal)?;
    let _ = LOG_GUARD.set(guard);

    tracing::info!(
        "Deeptone {} logging to {}",
        env!("CARGO_PKG_VERSION"),
        log_path.display()
    );
    Ok(())
}

fn touch(path: &Path) -> Result<(), LoggingError> {
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map(drop)
        .map_err(|source| LoggingError::CreateLogFile {
            path: path.to_path_buf(),
            source,
        })
}

fn is_launch_log(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == "log")
        && path
            .file_name()
            .and_then(|name| name.to_str())
            .is_some_and(|name| name.starts_with(LOG_FILE_PREFIX))
}

/// Delete the oldest launch logs beyond `keep`. Other files in `dir` are left alone.
fn prune_launch_logs(dir: &Path, keep: usize) -> Result<(), LoggingError> {
    let read_dir = fs::read_dir(dir).map_err(|source| LoggingError::ReadDir {
        path: dir.to_path_buf(),
        source,
    })?;
    let mut logs: Vec<(SystemTime, PathBuf)> = read_dir
        .filter_map(Result::ok)
        .filter(|entry| entry.file_type().is_ok_and(|kind| kind.is_file()))
        .map(|entry| entry.path())
        .filter(|path| is_launch_log(path))
        .map(|path| {
            let modified = fs::metadata(&path)
                .and_then(|meta| meta.modified())
                .unwrap_or(SystemTime::UNIX_EPOCH);
            (modified, path)
        })
        .collect();
    if logs.len() <= keep {
        return Ok(());
    }
    logs.sort_by_key(|(modified, _)| std::cmp::Reverse(*modified));
    for (_, path) in logs.split_off(keep) {
        fs::remove_file(&path).map_err(|source| LoggingError::RemoveFile { path, source })?;
    }
    Ok(())
}

fn launch_log_name(started: OffsetDateTime) -> Result<String, LoggingError> {
    const NAME_FORMAT: &[FormatItem<'_>] =
        format_description!("[year]-[month]-[day]_[hour]-[minute]-[second]");
    let stamp = started.format(NAME_FORMAT).map_err(LoggingError::FormatTime)?;
    Ok(format!("{LOG_FILE_PREFIX}{stamp}.log"))
}

fn line_timer(
    offset: UtcOffset,
) -> fmt::time::OffsetTime<time::format_description::BorrowedFormatItem<'static>> {
    const LINE_FORMAT: &[FormatItem<'static>] =
        format_description!("[year]-[month]-[day] [hour]:[minute]:[second]");
    fmt::time::OffsetTime::new(offset, LINE_FORMAT.into())
}

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}
