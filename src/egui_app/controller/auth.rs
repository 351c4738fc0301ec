use super::jobs::{LoginResult, RegisterResult};
use super::*;
use crate::backend::Credentials;

impl EguiController {
    pub fn show_login_form(&mut self) {
        self.switch_auth_mode(AuthMode::Login);
    }

    pub fn show_register_form(&mut self) {
        self.switch_auth_mode(AuthMode::Register);
    }

    fn switch_auth_mode(&mut self, mode: AuthMode) {
        if self.ui.auth.submitting || self.ui.auth.mode == mode {
            return;
        }
        self.ui.auth.mode = mode;
        self.ui.auth.password.clear();
        self.ui.auth.focus_username_requested = true;
    }

    pub fn submit_login(&mut self) {
        let Some(credentials) = self.form_credentials() else {
            return;
        };
        if self.jobs.begin_login(credentials) {
            self.ui.auth.submitting = true;
            self.set_status("Logging in…", StatusTone::Busy);
        }
    }

    pub fn submit_register(&mut self) {
        let Some(credentials) = self.form_credentials() else {
            return;
        };
        if self.jobs.begin_register(credentials) {
            self.ui.auth.submitting = true;
            self.set_status("Creating account…", StatusTone::Busy);
        }
    }

    fn form_credentials(&mut self) -> Option<Credentials> {
        if self.session.is_some() || self.ui.auth.submitting {
            return None;
        }
        if !self.ui.auth.is_complete() {
            self.set_status("Username and password are required", StatusTone::Warning);
            return None;
        }
        Some(Credentials {
            username: self.ui.auth.username.trim().to_string(),
            password: self.ui.auth.password.clone(),
        })
    }

    pub(super) fn apply_login_result(&mut self, message: LoginResult) {
        self.jobs.clear_login();
        self.ui.auth.submitting = false;
        if self.session.is_some() {
            return;
        }
        match message.result {
            Ok(username) => self.complete_login(username),
            Err(err) => {
                tracing::warn!("Login failed: {err}");
                self.set_status("Login failed", StatusTone::Error);
                self.alert(err.alert_message());
            }
        }
    }

    pub(super) fn apply_register_result(&mut self, message: RegisterResult) {
        self.jobs.clear_register();
        self.ui.auth.submitting = false;
        if self.session.is_some() {
            return;
        }
        match message.result {
            Ok(()) => {
                tracing::info!("Registered {}; logging in", message.credentials.username);
                if self.jobs.begin_login(message.credentials) {
                    self.ui.auth.submitting = true;
                    self.set_status("Account created; logging in…", StatusTone::Busy);
                }
            }
            Err(err) => {
                tracing::warn!("Registration failed: {err}");
                self.set_status("Registration failed", StatusTone::Error);
                self.alert(err.alert_message());
            }
        }
    }
}
