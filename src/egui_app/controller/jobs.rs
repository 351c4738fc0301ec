use crate::backend::{
    Backend, Credentials, HistoryError, LoginError, PredictError, PredictUpload, RegisterError,
};
use crate::prediction::PredictionRecord;
use std::{
    sync::{
        Arc,
        mpsc::{Receiver, Sender},
    },
    thread,
};

type TryRecvError = std::sync::mpsc::TryRecvError;

/// Results posted back to the UI thread by worker threads.
#[derive(Debug)]
pub(crate) enum JobMessage {
    LoggedIn(LoginResult),
    Registered(RegisterResult),
    Predicted(PredictResult),
    HistoryLoaded(HistoryResult),
}

#[derive(Debug)]
pub(crate) struct LoginResult {
    pub(crate) result: Result<String, LoginError>,
}

#[derive(Debug)]
pub(crate) struct RegisterResult {
    /// Reused for the automatic login after a successful registration.
    pub(crate) credentials: Credentials,
    pub(crate) result: Result<(), RegisterError>,
}

#[derive(Debug)]
pub(crate) struct PredictResult {
    pub(crate) request_id: u64,
    pub(crate) username: String,
    pub(crate) result: Result<PredictionRecord, PredictError>,
}

#[derive(Debug)]
pub(crate) struct HistoryResult {
    pub(crate) request_id: u64,
    pub(crate) username: String,
    pub(crate) result: Result<Vec<PredictionRecord>, HistoryError>,
}

/// Spawns one worker thread per request and tracks what is in flight.
pub(crate) struct ControllerJobs {
    backend: Arc<dyn Backend>,
    message_tx: Sender<JobMessage>,
    message_rx: Receiver<JobMessage>,
    login_in_progress: bool,
    register_in_progress: bool,
    /// Id of the analysis whose result the UI is waiting for.
    active_predict: Option<u64>,
    latest_predict_request: u64,
    history_in_flight: usize,
    latest_history_request: u64,
}

impl ControllerJobs {
    pub(super) fn new(backend: Arc<dyn Backend>) -> Self {
        let (message_tx, message_rx) = std::sync::mpsc::channel::<JobMessage>();
        Self {
            backend,
            message_tx,
            message_rx,
            login_in_progress: false,
            register_in_progress: false,
            active_predict: None,
            latest_predict_request: 0,
            history_in_flight: 0,
            latest_history_request: 0,
        }
    }

    pub(super) fn try_recv_message(&self) -> Result<JobMessage, TryRecvError> {
        self.message_rx.try_recv()
    }

    /// True while any request has not reported back yet.
    pub(super) fn any_in_progress(&self) -> bool {
        self.login_in_progress
            || self.register_in_progress
            || self.active_predict.is_some()
            || self.history_in_flight > 0
    }

    /// Start a login unless one is already running.
    pub(super) fn begin_login(&mut self, credentials: Credentials) -> bool {
        if self.login_in_progress {
            return false;
        }
        self.login_in_progress = true;
        self.spawn(move |backend| {
            JobMessage::LoggedIn(LoginResult {
                result: backend.login(&credentials),
            })
        });
        true
    }

    pub(super) fn clear_login(&mut self) {
        self.login_in_progress = false;
    }

    pub(super) fn begin_register(&mut self, credentials: Credentials) -> bool {
        if self.register_in_progress {
            return false;
        }
        self.register_in_progress = true;
        self.spawn(move |backend| {
            let result = backend.register(&credentials);
            JobMessage::Registered(RegisterResult {
                credentials,
                result,
            })
        });
        true
    }

    pub(super) fn clear_register(&mut self) {
        self.register_in_progress = false;
    }

    /// Start an analysis unless the current one has not reported back yet.
    pub(super) fn begin_predict(&mut self, upload: PredictUpload) -> bool {
        if self.active_predict.is_some() {
            return false;
        }
        self.latest_predict_request += 1;
        let request_id = self.latest_predict_request;
        self.active_predict = Some(request_id);
        self.spawn(move |backend| {
            let result = backend.predict(&upload);
            JobMessage::Predicted(PredictResult {
                request_id,
                username: upload.username,
                result,
            })
        });
        true
    }

    pub(super) fn predict_in_progress(&self) -> bool {
        self.active_predict.is_some()
    }

    /// Settle `request_id`; false when the result belongs to an abandoned analysis.
    pub(super) fn finish_predict(&mut self, request_id: u64) -> bool {
        if self.active_predict != Some(request_id) {
            return false;
        }
        self.active_predict = None;
        true
    }

    /// Abandon the running analysis; its worker still finishes but the result is dropped.
    pub(super) fn invalidate_predict(&mut self) {
        self.active_predict = None;
    }

    /// Start a history fetch; older fetches still running become stale.
    pub(super) fn begin_history(&mut self, username: String) -> u64 {
        self.latest_history_request += 1;
        self.history_in_flight += 1;
        let request_id = self.latest_history_request;
        self.spawn(move |backend| {
            let result = backend.history(&username);
            JobMessage::HistoryLoaded(HistoryResult {
                request_id,
                username,
                result,
            })
        });
        request_id
    }

    pub(super) fn finish_history(&mut self) {
        self.history_in_flight = self.history_in_flight.saturating_sub(1);
    }

    pub(super) fn is_latest_history(&self, request_id: u64) -> bool {
        request_id == self.latest_history_request
    }

    /// Make every running history fetch stale.
    pub(super) fn invalidate_history(&mut self) {
        self.latest_history_request += 1;
    }

    fn spawn<F>(&self, work: F)
    where
        F: FnOnce(&dyn Backend) -> JobMessage + Send + 'static,
    {
        let backend = Arc::clone(&self.backend);
        let tx = self.message_tx.clone();
        thread::spawn(move || {
            let message = work(backend.as_ref());
            let _ = tx.send(message);
        });
    }
}
