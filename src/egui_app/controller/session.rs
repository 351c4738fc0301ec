use super::*;

impl EguiController {
    /// Log back in as the persisted user, if any.
    pub fn restore_session(&mut self) {
        match self.session_store.load() {
            Ok(Some(username)) => {
                tracing::info!("Restoring session for {username}");
                self.complete_login(username);
            }
            Ok(None) => {}
            Err(err) => {
                tracing::warn!("Ignoring unreadable session: {err}");
                if let Err(err) = self.session_store.clear() {
                    tracing::warn!("Failed to clear session: {err}");
                }
            }
        }
    }

    /// Enter the authenticated view as `username`, persist it and load history.
    pub(super) fn complete_login(&mut self, username: String) {
        if let Err(err) = self.session_store.save(&username) {
            tracing::warn!("Failed to persist session: {err}");
        }
        self.ui.auth.password.clear();
        self.ui.auth.submitting = false;
        self.set_status(format!("Logged in as {username}"), StatusTone::Info);
        self.session = Some(username);
        self.refresh_history();
    }

    /// Drop the session and everything derived from it, back to the login form.
    pub fn logout(&mut self) {
        let Some(username) = self.session.take() else {
            return;
        };
        tracing::info!("Logging out {username}");
        if let Err(err) = self.session_store.clear() {
            tracing::warn!("Failed to clear session: {err}");
        }
        self.stop_preview();
        self.jobs.invalidate_history();
        self.jobs.invalidate_predict();
        self.ui.history = HistoryState::default();
        self.ui.upload = UploadState::default();
        self.ui.auth = AuthFormState {
            focus_username_requested: true,
            ..AuthFormState::default()
        };
        self.set_status("Logged out", StatusTone::Idle);
    }
}
