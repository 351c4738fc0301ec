//! Local playback of the selected file before it is uploaded.

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use rodio::{OutputStream, Sink};

#[derive(Debug, thiserror::Error)]
pub enum PreviewError {
    #[error("Could not open {path}: {source}")]
    Open {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Could not decode {path}: {message}")]
    Decode { path: PathBuf, message: String },
    #[error("No audio output available: {0}")]
    Output(String),
}

/// One file playing on the default output device. Dropping it stops playback.
pub struct AudioPreview {
    _stream: OutputStream,
    sink: Sink,
    path: PathBuf,
}

impl AudioPreview {
    /// Decode `path` and start playing it from the beginning.
    pub fn play(path: &Path) -> Result<Self, PreviewError> {
        let file = File::open(path).map_err(|source| PreviewError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        let source =
            rodio::Decoder::new(BufReader::new(file)).map_err(|err| PreviewError::Decode {
                path: path.to_path_buf(),
                message: err.to_string(),
            })?;
        let stream = rodio::OutputStreamBuilder::open_default_stream()
            .map_err(|err| PreviewError::Output(err.to_string()))?;
        let sink = Sink::connect_new(stream.mixer());
        sink.append(source);
        tracing::debug!("Previewing {}", path.display());
        Ok(Self {
            _stream: stream,
            sink,
            path: path.to_path_buf(),
        })
    }

    /// True until the file has played to the end.
    pub fn is_playing(&self) -> bool {
        !self.sink.empty()
    }

    pub fn stop(&self) {
        self.sink.stop();
    }
}

impl std::fmt::Debug for AudioPreview {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AudioPreview")
            .field("path", &self.path)
            .field("playing", &self.is_playing())
            .finish()
    }
}
