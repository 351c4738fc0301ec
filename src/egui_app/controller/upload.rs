use super::jobs::PredictResult;
use super::*;
use crate::audio_file::{ACCEPTED_EXTENSIONS, SelectedAudio};
use crate::backend::PredictUpload;
use rfd::FileDialog;
use std::path::{Path, PathBuf};

impl EguiController {
    pub fn pick_audio_file_via_dialog(&mut self) {
        let Some(path) = FileDialog::new()
            .add_filter("Audio", &ACCEPTED_EXTENSIONS)
            .pick_file()
        else {
            return;
        };
        self.select_audio_file(&path);
    }

    /// Use the first dropped path as the upload candidate.
    pub fn handle_dropped_files(&mut self, paths: Vec<PathBuf>) {
        if self.session.is_none() || self.ui.upload.analyzing {
            return;
        }
        if let Some(path) = paths.first() {
            self.select_audio_file(path);
        }
    }

    /// Validate `path` and make it the selected file; a rejected file clears the selection.
    pub fn select_audio_file(&mut self, path: &Path) {
        self.stop_preview();
        match SelectedAudio::inspect(path) {
            Ok(selected) => {
                self.set_status(
                    format!("Selected {} ({})", selected.file_name, selected.size_label()),
                    StatusTone::Info,
                );
                self.ui.upload.selected = Some(selected);
            }
            Err(err) => {
                tracing::info!("Rejected {}: {err}", path.display());
                self.ui.upload.selected = None;
                self.set_status("No file selected", StatusTone::Warning);
                self.alert(err.to_string());
            }
        }
    }

    pub fn can_submit_analysis(&self) -> bool {
        self.ui.upload.selected.is_some()
            && !self.ui.upload.analyzing
            && !self.jobs.predict_in_progress()
            && self.session.is_some()
    }

    pub fn submit_analysis(&mut self) {
        let Some(selected) = self.ui.upload.selected.clone() else {
            self.alert("Please choose a file.");
            return;
        };
        let Some(username) = self.session.clone() else {
            self.alert("User not logged in.");
            return;
        };
        let upload = PredictUpload {
            path: selected.path.clone(),
            file_name: selected.file_name.clone(),
            content_type: selected.content_type().to_string(),
            username,
        };
        if !self.jobs.begin_predict(upload) {
            self.set_status("An analysis is already running", StatusTone::Warning);
            return;
        }
        self.ui.upload.analyzing = true;
        self.ui.upload.result = None;
        self.set_status(format!("Analyzing {}…", selected.file_name), StatusTone::Busy);
    }

    pub(super) fn apply_predict_result(&mut self, message: PredictResult) {
        if !self.jobs.finish_predict(message.request_id) {
            tracing::debug!("Dropping abandoned analysis result {}", message.request_id);
            return;
        }
        if self.session.as_deref() != Some(message.username.as_str()) {
            tracing::debug!("Dropping analysis result for {}", message.username);
            return;
        }
        self.ui.upload.analyzing = false;
        match message.result {
            Ok(record) => {
                self.set_status(
                    format!("Analysis complete: {}", record.prediction),
                    StatusTone::Info,
                );
                self.ui.upload.result = Some(record);
                self.refresh_history();
            }
            Err(err) => {
                tracing::error!("Prediction request failed: {err}");
                self.set_status("Analysis failed", StatusTone::Error);
                self.alert(err.alert_message());
            }
        }
    }

    pub fn toggle_preview(&mut self) {
        if self.preview.is_some() {
            self.stop_preview();
            return;
        }
        let Some(selected) = self.ui.upload.selected.as_ref() else {
            return;
        };
        match AudioPreview::play(&selected.path) {
            Ok(preview) => {
                self.preview = Some(preview);
                self.ui.upload.previewing = true;
            }
            Err(err) => {
                tracing::warn!("Preview failed: {err}");
                self.set_status(format!("Preview unavailable: {err}"), StatusTone::Warning);
            }
        }
    }

    pub fn stop_preview(&mut self) {
        if let Some(preview) = self.preview.take() {
            preview.stop();
        }
        self.ui.upload.previewing = false;
    }

    pub(super) fn poll_preview(&mut self) {
        if self
            .preview
            .as_ref()
            .is_some_and(|preview| !preview.is_playing())
        {
            self.stop_preview();
        }
    }
}
