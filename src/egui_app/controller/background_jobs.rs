use super::jobs::JobMessage;
use super::*;
use std::sync::mpsc::TryRecvError;

impl EguiController {
    /// Drain finished worker results without blocking the frame.
    pub(super) fn poll_background_jobs(&mut self) {
        loop {
            match self.jobs.try_recv_message() {
                Ok(message) => self.handle_job_message(message),
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    tracing::error!("Background job channel disconnected");
                    break;
                }
            }
        }
    }

    fn handle_job_message(&mut self, message: JobMessage) {
        match message {
            JobMessage::LoggedIn(message) => self.apply_login_result(message),
            JobMessage::Registered(message) => self.apply_register_result(message),
            JobMessage::Predicted(message) => self.apply_predict_result(message),
            JobMessage::HistoryLoaded(message) => self.apply_history_result(message),
        }
    }
}
