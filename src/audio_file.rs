//! Local audio file selection checks applied before upload.

use std::path::{Path, PathBuf};

/// Largest file the uploader accepts (100 MB).
pub const MAX_UPLOAD_BYTES: u64 = 100 * 1024 * 1024;

/// Lowercase extensions the backend can decode.
pub const ACCEPTED_EXTENSIONS: [&str; 3] = ["wav", "mp3", "m4a"];

/// Errors raised while validating a candidate upload.
#[derive(Debug, thiserror::Error)]
pub enum AudioFileError {
    #[error("Could not read {path}: {source}")]
    Unreadable {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("{0} is not a file")]
    NotAFile(PathBuf),
    #[error("File is too large. Max size is 100MB.")]
    TooLarge { size_bytes: u64 },
    #[error("Unsupported file type. Choose a WAV, MP3 or M4A file.")]
    UnsupportedExtension(PathBuf),
}

/// A local file that passed the upload checks.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SelectedAudio {
    pub path: PathBuf,
    pub file_name: String,
    pub size_bytes: u64,
}

impl SelectedAudio {
    /// Validate `path` as an uploadable audio file.
    ///
    /// The size limit is checked before the extension so an oversized file
    /// always reports the size error.
    pub fn inspect(path: &Path) -> Result<Self, AudioFileError> {
        let metadata = std::fs::metadata(path).map_err(|source| AudioFileError::Unreadable {
            path: path.to_path_buf(),
            source,
        })?;
        if !metadata.is_file() {
            return Err(AudioFileError::NotAFile(path.to_path_buf()));
        }
        let size_bytes = metadata.len();
        if size_bytes > MAX_UPLOAD_BYTES {
            return Err(AudioFileError::TooLarge { size_bytes });
        }
        if extension_of(path).is_none() {
            return Err(AudioFileError::UnsupportedExtension(path.to_path_buf()));
        }
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "audio".to_string());
        Ok(Self {
            path: path.to_path_buf(),
            file_name,
            size_bytes,
        })
    }

    /// MIME type sent with the multipart file part.
    pub fn content_type(&self) -> &'static str {
        match extension_of(&self.path) {
            Some("wav") => "audio/wav",
            Some("mp3") => "audio/mpeg",
            Some("m4a") => "audio/mp4",
            _ => "application/octet-stream",
        }
    }

    /// Human-readable size, e.g. `4.2 MB`.
    pub fn size_label(&self) -> String {
        const KB: f64 = 1024.0;
        const MB: f64 = KB * 1024.0;
        let size = self.size_bytes as f64;
        if size >= MB {
            format!("{:.1} MB", size / MB)
        } else if size >= KB {
            format!("{:.1} KB", size / KB)
        } else {
            format!("{} B", self.size_bytes)
        }
    }
}

fn extension_of(path: &Path) -> Option<&'static str> {
    let ext = path.extension()?.to_str()?;
    ACCEPTED_EXTENSIONS
        .iter()
        .copied()
        .find(|accepted| accepted.eq_ignore_ascii_case(ext))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use tempfile::tempdir;

    fn sized_file(dir: &Path, name: &str, len: u64) -> PathBuf {
        let path = dir.join(name);
        File::create(&path).unwrap().set_len(len).unwrap();
        path
    }

    #[test]
    fn accepts_supported_extensions_case_insensitively() {
        let dir = tempdir().unwrap();
        let path = sized_file(dir.path(), "Voice.MP3", 2048);
        let selected = SelectedAudio::inspect(&path).unwrap();
        assert_eq!(selected.file_name, "Voice.MP3");
        assert_eq!(selected.size_bytes, 2048);
        assert_eq!(selected.content_type(), "audio/mpeg");
        assert_eq!(selected.size_label(), "2.0 KB");
    }

    #[test]
    fn file_at_limit_is_accepted() {
        let dir = tempdir().unwrap();
        let path = sized_file(dir.path(), "edge.wav", MAX_UPLOAD_BYTES);
        assert!(SelectedAudio::inspect(&path).is_ok());
    }

    #[test]
    fn file_over_limit_reports_size_even_with_bad_extension() {
        let dir = tempdir().unwrap();
        let path = sized_file(dir.path(), "huge.flac", MAX_UPLOAD_BYTES + 1);
        let err = SelectedAudio::inspect(&path).unwrap_err();
        assert!(matches!(err, AudioFileError::TooLarge { size_bytes } if size_bytes == MAX_UPLOAD_BYTES + 1));
        assert_eq!(err.to_string(), "File is too large. Max size is 100MB.");
    }

    #[test]
    fn rejects_unsupported_extension_and_directories() {
        let dir = tempdir().unwrap();
        let path = sized_file(dir.path(), "notes.txt", 10);
        assert!(matches!(
            SelectedAudio::inspect(&path),
            Err(AudioFileError::UnsupportedExtension(_))
        ));
        assert!(matches!(
            SelectedAudio::inspect(dir.path()),
            Err(AudioFileError::NotAFile(_))
        ));
        assert!(matches!(
            SelectedAudio::inspect(&dir.path().join("missing.wav")),
            Err(AudioFileError::Unreadable { .. })
        ));
    }
}
