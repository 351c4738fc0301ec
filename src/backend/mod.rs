//! Client for the remote detection service.

mod multipart;

pub mod api;

pub use api::{
    Credentials, DEFAULT_BASE_URL, HistoryError, LoginError, PredictError, PredictUpload,
    RegisterError,
};

use crate::prediction::PredictionRecord;

/// The calls the UI needs from the detection service.
///
/// Implementations block; the controller runs them on worker threads.
pub trait Backend: Send + Sync {
    fn login(&self, credentials: &Credentials) -> Result<String, LoginError>;
    fn register(&self, credentials: &Credentials) -> Result<(), RegisterError>;
    fn predict(&self, upload: &PredictUpload) -> Result<PredictionRecord, PredictError>;
    fn history(&self, username: &str) -> Result<Vec<PredictionRecord>, HistoryError>;
}

/// [`Backend`] over HTTP at a fixed base address.
#[derive(Clone, Debug)]
pub struct HttpBackend {
    base_url: String,
}

impl HttpBackend {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }
}

impl Backend for HttpBackend {
    fn login(&self, credentials: &Credentials) -> Result<String, LoginError> {
        api::login(&self.base_url, credentials)
    }

    fn register(&self, credentials: &Credentials) -> Result<(), RegisterError> {
        api::register(&self.base_url, credentials)
    }

    fn predict(&self, upload: &PredictUpload) -> Result<PredictionRecord, PredictError> {
        api::predict(&self.base_url, upload)
    }

    fn history(&self, username: &str) -> Result<Vec<PredictionRecord>, HistoryError> {
        api::fetch_history(&self.base_url, username)
    }
}
