//! HTTP calls against the detection backend.

use std::fmt;
use std::fs::File;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::multipart::MultipartForm;
use crate::http_client::{self, HttpOutcome};
use crate::prediction::PredictionRecord;

pub const DEFAULT_BASE_URL: &str = "https://deeptoneai.onrender.com";

const MAX_AUTH_RESPONSE_BYTES: usize = 64 * 1024;
const MAX_PREDICT_RESPONSE_BYTES: usize = 256 * 1024;
const MAX_HISTORY_RESPONSE_BYTES: usize = 4 * 1024 * 1024;

/// Shown when a login request never produced a readable answer.
pub const LOGIN_UNREACHABLE_MESSAGE: &str = "Error logging in";
const LOGIN_REJECTED_FALLBACK: &str = "Login failed.";
/// Shown when a register request never produced a readable answer.
pub const REGISTER_UNREACHABLE_MESSAGE: &str =
    "Error during registration. Please try again later.";
const REGISTER_REJECTED_FALLBACK: &str = "Registration failed.";
/// Shown for any failed analysis; the detailed cause goes to the log.
pub const ANALYSIS_FAILED_MESSAGE: &str = "Failed to analyze audio. Backend may be asleep or not reachable. Please try again in 30–60 seconds.";

/// Username/password pair posted to `/login` and `/register`.
#[derive(Clone, PartialEq, Eq, Serialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// A validated local file to send to `/predict`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PredictUpload {
    pub path: PathBuf,
    pub file_name: String,
    pub content_type: String,
    pub username: String,
}

#[derive(Debug, thiserror::Error)]
pub enum LoginError {
    /// The backend answered but did not accept the credentials.
    #[error("{0}")]
    Rejected(String),
    #[error("HTTP error: {0}")]
    Transport(String),
    #[error("Invalid login response: {0}")]
    InvalidResponse(String),
}

impl LoginError {
    /// Text for the blocking alert.
    pub fn alert_message(&self) -> String {
        match self {
            Self::Rejected(message) => message.clone(),
            Self::Transport(_) | Self::InvalidResponse(_) => LOGIN_UNREACHABLE_MESSAGE.to_string(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum RegisterError {
    #[error("{0}")]
    Rejected(String),
    #[error("HTTP error: {0}")]
    Transport(String),
    #[error("Invalid register response: {0}")]
    InvalidResponse(String),
}

impl RegisterError {
    pub fn alert_message(&self) -> String {
        match self {
            Self::Rejected(message) => message.clone(),
            Self::Transport(_) | Self::InvalidResponse(_) => {
                REGISTER_UNREACHABLE_MESSAGE.to_string()
            }
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum PredictError {
    #[error("Failed to read {path}: {source}")]
    ReadFile {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Status {code} – {body}")]
    Status { code: u16, body: String },
    /// 2xx answer that carries an `error` instead of a prediction.
    #[error("Analysis failed: {0}")]
    Backend(String),
    #[error("HTTP error: {0}")]
    Transport(String),
    #[error("Invalid prediction response: {0}")]
    InvalidResponse(String),
}

impl PredictError {
    pub fn alert_message(&self) -> String {
        match self {
            Self::Backend(message) => format!("Analysis failed: {message}"),
            _ => ANALYSIS_FAILED_MESSAGE.to_string(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum HistoryError {
    #[error("Status {code}: {body}")]
    Status { code: u16, body: String },
    #[error("HTTP error: {0}")]
    Transport(String),
}

#[derive(Debug, Default, Deserialize)]
struct AuthResponseWire {
    #[serde(default)]
    success: Option<bool>,
    #[serde(default)]
    username: Option<String>,
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

/// Log in and return the username the backend confirmed.
pub fn login(base_url: &str, credentials: &Credentials) -> Result<String, LoginError> {
    let url = endpoint(base_url, &["login"]).map_err(LoginError::Transport)?;
    let result = http_client::agent()
        .post(&url)
        .set("Accept", "application/json")
        .send_json(credentials);
    let outcome =
        http_client::into_outcome(result, MAX_AUTH_RESPONSE_BYTES).map_err(LoginError::Transport)?;
    parse_login_outcome(&outcome)
}

/// Create an account. Success does not log the user in.
pub fn register(base_url: &str, credentials: &Credentials) -> Result<(), RegisterError> {
    let url = endpoint(base_url, &["register"]).map_err(RegisterError::Transport)?;
    let result = http_client::agent()
        .post(&url)
        .set("Accept", "application/json")
        .send_json(credentials);
    let outcome = http_client::into_outcome(result, MAX_AUTH_RESPONSE_BYTES)
        .map_err(RegisterError::Transport)?;
    parse_register_outcome(&outcome)
}

/// Upload one audio file for analysis.
pub fn predict(base_url: &str, upload: &PredictUpload) -> Result<PredictionRecord, PredictError> {
    let url = endpoint(base_url, &["predict"]).map_err(PredictError::Transport)?;
    let read_error = |source: std::io::Error| PredictError::ReadFile {
        path: upload.path.clone(),
        source,
    };
    let file = File::open(&upload.path).map_err(read_error)?;
    let file_len = file.metadata().map_err(read_error)?.len();
    let mut form = MultipartForm::new();
    form.file(
        "file",
        &upload.file_name,
        &upload.content_type,
        file,
        file_len,
    )
    .text("username", &upload.username);
    let body = form.finish();

    let result = http_client::agent()
        .post(&url)
        .set("Accept", "application/json")
        .set("Content-Type", &body.content_type)
        .set("Content-Length", &body.content_length.to_string())
        .send(body.reader);
    let outcome = http_client::into_outcome(result, MAX_PREDICT_RESPONSE_BYTES)
        .map_err(PredictError::Transport)?;
    parse_predict_outcome(&outcome)
}

/// Fetch the user's past predictions, newest first as ordered by the backend.
pub fn fetch_history(
    base_url: &str,
    username: &str,
) -> Result<Vec<PredictionRecord>, HistoryError> {
    let url = endpoint(base_url, &["history", username]).map_err(HistoryError::Transport)?;
    let result = http_client::agent()
        .get(&url)
        .set("Accept", "application/json")
        .call();
    let outcome = http_client::into_outcome(result, MAX_HISTORY_RESPONSE_BYTES)
        .map_err(HistoryError::Transport)?;
    if !outcome.is_success() {
        return Err(HistoryError::Status {
            code: outcome.status,
            body: outcome.body,
        });
    }
    Ok(parse_history_body(&outcome.body))
}

/// Append percent-encoded path segments to the base address.
fn endpoint(base_url: &str, segments: &[&str]) -> Result<String, String> {
    let mut url = url::Url::parse(base_url)
        .map_err(|err| format!("Invalid backend URL {base_url:?}: {err}"))?;
    url.path_segments_mut()
        .map_err(|_| format!("Backend URL {base_url:?} cannot carry a path"))?
        .pop_if_empty()
        .extend(segments);
    Ok(url.into())
}

fn parse_login_outcome(outcome: &HttpOutcome) -> Result<String, LoginError> {
    let wire: AuthResponseWire = serde_json::from_str(outcome.body.trim())
        .map_err(|err| LoginError::InvalidResponse(format!("{err}: {}", outcome.body.trim())))?;
    if outcome.is_success() {
        if let Some(username) = wire.username.filter(|name| !name.trim().is_empty()) {
            return Ok(username);
        }
    }
    Err(LoginError::Rejected(
        wire.error
            .unwrap_or_else(|| LOGIN_REJECTED_FALLBACK.to_string()),
    ))
}

fn parse_register_outcome(outcome: &HttpOutcome) -> Result<(), RegisterError> {
    let wire: AuthResponseWire = serde_json::from_str(outcome.body.trim()).map_err(|err| {
        RegisterError::InvalidResponse(format!("{err}: {}", outcome.body.trim()))
    })?;
    if outcome.is_success() && wire.success != Some(false) && wire.error.is_none() {
        return Ok(());
    }
    Err(RegisterError::Rejected(
        wire.error
            .or(wire.message)
            .unwrap_or_else(|| REGISTER_REJECTED_FALLBACK.to_string()),
    ))
}

fn parse_predict_outcome(outcome: &HttpOutcome) -> Result<PredictionRecord, PredictError> {
    if !outcome.is_success() {
        return Err(PredictError::Status {
            code: outcome.status,
            body: outcome.body.clone(),
        });
    }
    let value: serde_json::Value = serde_json::from_str(outcome.body.trim())
        .map_err(|err| PredictError::InvalidResponse(err.to_string()))?;
    if value.get("prediction").is_none() {
        if let Some(error) = value.get("error").and_then(|error| error.as_str()) {
            return Err(PredictError::Backend(error.to_string()));
        }
    }
    serde_json::from_value(value).map_err(|err| PredictError::InvalidResponse(err.to_string()))
}

/// Decode a history body; anything but a JSON array yields no rows.
pub(crate) fn parse_history_body(body: &str) -> Vec<PredictionRecord> {
    let Ok(serde_json::Value::Array(items)) = serde_json::from_str(body.trim()) else {
        tracing::warn!("History body is not a JSON array; treating as empty");
        return Vec::new();
    };
    items
        .into_iter()
        .filter_map(|item| match serde_json::from_value(item) {
            Ok(record) => Some(record),
            Err(err) => {
                tracing::debug!("Skipping malformed history row: {err}");
                None
            }
        })
        .collect()
}
