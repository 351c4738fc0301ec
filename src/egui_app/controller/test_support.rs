use super::*;
use crate::backend::{
    Credentials, HistoryError, LoginError, PredictError, PredictUpload, RegisterError,
};
use crate::prediction::PredictionRecord;
use crate::session::SessionStore;
use std::collections::VecDeque;
use std::sync::{Mutex, mpsc::Receiver};
use std::time::Duration;
use tempfile::tempdir;

/// Backend that answers from scripted queues and records every call.
#[derive(Default)]
pub(super) struct StubBackend {
    pub(super) logins: Mutex<VecDeque<Result<String, LoginError>>>,
    pub(super) registrations: Mutex<VecDeque<Result<(), RegisterError>>>,
    pub(super) predictions: Mutex<VecDeque<Result<PredictionRecord, PredictError>>>,
    pub(super) histories: Mutex<VecDeque<Result<Vec<PredictionRecord>, HistoryError>>>,
    /// Each predict call takes the next gate and blocks until the test sends on it.
    pub(super) predict_gates: Mutex<VecDeque<Receiver<()>>>,
    pub(super) calls: Mutex<Vec<String>>,
}

impl StubBackend {
    pub(super) fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }
}

impl Backend for StubBackend {
    fn login(&self, credentials: &Credentials) -> Result<String, LoginError> {
        self.record(format!("login:{}", credentials.username));
        self.logins
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(credentials.username.clone()))
    }

    fn register(&self, credentials: &Credentials) -> Result<(), RegisterError> {
        self.record(format!("register:{}", credentials.username));
        self.registrations
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(Ok(()))
    }

    fn predict(&self, upload: &PredictUpload) -> Result<PredictionRecord, PredictError> {
        let gate = self.predict_gates.lock().unwrap().pop_front();
        self.record(format!("predict:{}:{}", upload.username, upload.file_name));
        if let Some(gate) = gate {
            let _ = gate.recv();
            self.record(format!("released:{}", upload.file_name));
        }
        self.predictions
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(record(&upload.file_name, "Real")))
    }

    fn history(&self, username: &str) -> Result<Vec<PredictionRecord>, HistoryError> {
        self.record(format!("history:{username}"));
        self.histories
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(Vec::new()))
    }
}

pub(super) fn record(filename: &str, prediction: &str) -> PredictionRecord {
    PredictionRecord {
        id: Some(format!("id-{filename}")),
        username: None,
        filename: filename.to_string(),
        prediction: prediction.to_string(),
        accuracy: 0.91,
        recall: 0.82,
        precision: 0.73,
        f1_score: 0.64,
        timestamp: Some("2024-05-01T12:30:00Z".to_string()),
    }
}

pub(super) fn session_store() -> SessionStore {
    let dir = tempdir().unwrap();
    let path = dir.path().join("session.toml");
    std::mem::forget(dir);
    SessionStore::with_path(path)
}

pub(super) fn controller_with(backend: Arc<dyn Backend>) -> EguiController {
    EguiController::new(backend, session_store())
}

pub(super) fn stub_controller() -> (EguiController, Arc<StubBackend>) {
    let backend = Arc::new(StubBackend::default());
    let controller = controller_with(backend.clone());
    (controller, backend)
}

/// Tick until every background job has reported back.
pub(super) fn drain_jobs(controller: &mut EguiController) {
    for _ in 0..400 {
        controller.tick();
        if !controller.jobs.any_in_progress() {
            return;
        }
        std::thread::sleep(Duration::from_millis(5));
    }
    panic!("background jobs did not finish");
}

/// Tick while waiting for `done` to hold, for work the controller no longer tracks.
pub(super) fn tick_until(controller: &mut EguiController, mut done: impl FnMut() -> bool) {
    for _ in 0..400 {
        controller.tick();
        if done() {
            return;
        }
        std::thread::sleep(Duration::from_millis(5));
    }
    panic!("condition was not reached");
}

pub(super) fn log_in(controller: &mut EguiController, username: &str) {
    controller.ui.auth.username = username.to_string();
    controller.ui.auth.password = "secret".to_string();
    controller.submit_login();
    drain_jobs(controller);
    assert_eq!(controller.current_user(), Some(username));
}
