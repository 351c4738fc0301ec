//! Controller that owns UI state and talks to the backend off the UI thread.

use crate::backend::Backend;
use crate::egui_app::state::*;
use crate::egui_app::ui::style::StatusTone;
use crate::preview::AudioPreview;
use crate::session::SessionStore;
use std::sync::Arc;

mod auth;
mod background_jobs;
mod history;
mod jobs;
mod session;
mod upload;

#[cfg(test)]
mod test_support;

use jobs::ControllerJobs;

/// Maintains app state and bridges the backend to the egui UI.
pub struct EguiController {
    pub ui: UiState,
    session: Option<String>,
    session_store: SessionStore,
    jobs: ControllerJobs,
    preview: Option<AudioPreview>,
}

impl EguiController {
    pub fn new(backend: Arc<dyn Backend>, session_store: SessionStore) -> Self {
        Self {
            ui: UiState::default(),
            session: None,
            session_store,
            jobs: ControllerJobs::new(backend),
            preview: None,
        }
    }

    /// Username of the logged-in user.
    pub fn current_user(&self) -> Option<&str> {
        self.session.as_deref()
    }

    pub fn view(&self) -> AppView {
        if self.session.is_some() {
            return AppView::Authenticated;
        }
        match self.ui.auth.mode {
            AuthMode::Login => AppView::Login,
            AuthMode::Register => AppView::Register,
        }
    }

    /// Apply finished background work. Call once per frame.
    pub fn tick(&mut self) {
        self.poll_background_jobs();
        self.poll_preview();
    }

    /// True while the UI should keep repainting to pick up results.
    pub fn has_pending_work(&self) -> bool {
        self.jobs.any_in_progress() || self.ui.upload.previewing
    }

    pub fn set_status(&mut self, text: impl Into<String>, tone: StatusTone) {
        self.ui.status = StatusBarState::new(text, tone);
    }

    /// Queue a blocking alert.
    pub fn alert(&mut self, message: impl Into<String>) {
        let message = message.into();
        tracing::info!("Alert: {message}");
        self.ui.alerts.push(message);
    }

    pub fn dismiss_alert(&mut self) {
        self.ui.alerts.dismiss();
    }
}
