//! egui renderer for the application UI.

mod alert_modal;
mod auth_forms;
mod history_panel;
mod landing;
mod result_chart;
mod status_bar;
pub mod style;
mod top_bar;
mod uploader;

use crate::backend::{Backend, HttpBackend};
use crate::config;
use crate::egui_app::controller::EguiController;
use crate::egui_app::state::AppView;
use crate::session::SessionStore;
use eframe::egui;
use std::sync::Arc;
use std::time::Duration;
use time::UtcOffset;

/// Smallest window that still fits the sidebar next to the uploader.
pub const MIN_VIEWPORT_SIZE: egui::Vec2 = egui::vec2(880.0, 600.0);

/// Renders the egui UI using the shared controller state.
pub struct EguiApp {
    controller: EguiController,
    visuals_set: bool,
    local_offset: UtcOffset,
}

impl EguiApp {
    /// Build the app from persisted configuration and session.
    pub fn launch(local_offset: UtcOffset) -> Result<Self, String> {
        let settings =
            config::load_or_default().map_err(|err| format!("Failed to load config: {err}"))?;
        let session_store =
            SessionStore::new().map_err(|err| format!("Failed to locate session file: {err}"))?;
        tracing::info!("Using backend {}", settings.backend.base_url);
        let backend: Arc<dyn Backend> = Arc::new(HttpBackend::new(settings.backend.base_url));
        let mut controller = EguiController::new(backend, session_store);
        controller.restore_session();
        Ok(Self::new(controller, local_offset))
    }

    pub fn new(controller: EguiController, local_offset: UtcOffset) -> Self {
        Self {
            controller,
            visuals_set: false,
            local_offset,
        }
    }

    fn apply_visuals(&mut self, ctx: &egui::Context) {
        if self.visuals_set {
            return;
        }
        let mut visuals = egui::Visuals::dark();
        style::apply_visuals(&mut visuals);
        ctx.set_visuals(visuals);
        self.visuals_set = true;
    }

    fn handle_dropped_files(&mut self, ctx: &egui::Context) {
        let dropped = ctx.input(|i| i.raw.dropped_files.clone());
        let paths: Vec<_> = dropped.into_iter().filter_map(|file| file.path).collect();
        if !paths.is_empty() {
            self.controller.handle_dropped_files(paths);
        }
    }
}

impl eframe::App for EguiApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.apply_visuals(ctx);
        self.controller.tick();
        self.handle_dropped_files(ctx);
        self.render_status(ctx);
        match self.controller.view() {
            AppView::Login | AppView::Register => self.render_landing(ctx),
            AppView::Authenticated => {
                self.render_top_bar(ctx);
                self.render_history_panel(ctx);
                self.render_uploader(ctx);
            }
        }
        self.render_alert_modal(ctx);
        if self.controller.has_pending_work() {
            ctx.request_repaint_after(Duration::from_millis(100));
        }
    }
}
