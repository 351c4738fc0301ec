//! Client configuration stored as TOML in the app directory.

mod io;
mod types;


/// Default filename used to store the client configuration.
pub const CONFIG_FILE_NAME: &str = "config.toml";
/// Environment variable overriding `backend.base_url`.
pub const BACKEND_URL_ENV: &str = "DEEPTONE_BACKEND_URL";

pub(crate) use io::atomic_write;
pub use io::{config_path, load_from_path, load_or_default, save_to_path};
pub use types::{AppSettings, BackendSettings, ConfigError};
