//! Desktop client for the Deeptone AI audio deepfake detection service.

/// Per-user application directory resolution.
pub mod app_dirs;
/// Local upload candidate checks.
pub mod audio_file;
/// Remote detection service client.
pub mod backend;
/// Persisted client configuration.
pub mod config;
/// egui front end.
pub mod egui_app;
pub(crate) mod http_client;
/// File logging setup.
pub mod logging;
/// Prediction records and chart projection.
pub mod prediction;
/// Local playback of the selected file.
pub mod preview;
/// Persisted login session.
pub mod session;
