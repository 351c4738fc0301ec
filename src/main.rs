#![deny(missing_docs)]

//! Entry point for the Deeptone AI desktop client.
#![cfg_attr(
    all(not(debug_assertions), target_os = "windows"),
    windows_subsystem = "windows"
)]
use deeptone::egui_app::ui::{EguiApp, MIN_VIEWPORT_SIZE};
use deeptone::logging;
use eframe::egui;
use time::UtcOffset;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Must run before any other thread exists.
    let local_offset = UtcOffset::current_local_offset().unwrap_or(UtcOffset::UTC);

    if let Err(err) = logging::init(local_offset) {
        eprintln!("Logging disabled: {err}");
    }

    let viewport = egui::ViewportBuilder::default()
        .with_title("Deeptone AI")
        .with_inner_size([1100.0, 720.0])
        .with_min_inner_size(MIN_VIEWPORT_SIZE)
        .with_drag_and_drop(true);

    let native_options = eframe::NativeOptions {
        viewport,
        ..Default::default()
    };

    eframe::run_native(
        "Deeptone AI",
        native_options,
        Box::new(move |_cc| match EguiApp::launch(local_offset) {
            Ok(app) => Ok(Box::new(app)),
            Err(err) => {
                tracing::error!("Startup failed: {err}");
                Ok(Box::new(LaunchError { message: err }))
            }
        }),
    )?;
    Ok(())
}

/// Minimal fallback app to display initialization errors.
struct LaunchError {
    message: String,
}

impl eframe::App for LaunchError {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                ui.heading("Failed to start UI");
                ui.label(&self.message);
            });
        });
    }
}
