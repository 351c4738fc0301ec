//! Shared state types for the egui UI.

mod alerts;
mod auth;
mod history;
mod status;
mod upload;

pub use alerts::*;
pub use auth::*;
pub use history::*;
pub use status::*;
pub use upload::*;

/// Which top-level screen is showing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AppView {
    Login,
    Register,
    /// Uploader, history and results for the logged-in user.
    Authenticated,
}

/// Top-level UI model consumed by the egui renderer.
#[derive(Clone, Debug)]
pub struct UiState {
    pub auth: AuthFormState,
    pub upload: UploadState,
    pub history: HistoryState,
    /// Blocking alerts waiting for acknowledgement.
    pub alerts: AlertQueue,
    pub status: StatusBarState,
}

impl Default for UiState {
    fn default() -> Self {
        Self {
            auth: AuthFormState::default(),
            upload: UploadState::default(),
            history: HistoryState::default(),
            alerts: AlertQueue::default(),
            status: StatusBarState::idle(),
        }
    }
}
