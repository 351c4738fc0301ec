use std::{
    path::PathBuf,
    sync::{Mutex, MutexGuard, OnceLock},
};

const CONFIG_HOME_ENV: &str = "DEEPTONE_CONFIG_HOME";
const BACKEND_URL_ENV: &str = "DEEPTONE_BACKEND_URL";

static ENV_LOCK: OnceLock<Mutex<()>> = OnceLock::new();

/// Points the app directory at a temp dir and clears the backend override
/// until dropped.
pub struct DeeptoneEnvGuard {
    previous: Vec<(&'static str, Option<String>)>,
    _lock: MutexGuard<'static, ()>,
}

impl DeeptoneEnvGuard {
    pub fn set_config_home(path: PathBuf) -> Self {
        let lock = ENV_LOCK
            .get_or_init(|| Mutex::new(()))
            .lock()
            .unwrap_or_else(|err| err.into_inner());
        let previous = vec![
            (CONFIG_HOME_ENV, std::env::var(CONFIG_HOME_ENV).ok()),
            (BACKEND_URL_ENV, std::env::var(BACKEND_URL_ENV).ok()),
        ];
        // SAFETY: tests run under a global lock to prevent concurrent env mutations.
        unsafe {
            std::env::set_var(CONFIG_HOME_ENV, path);
            std::env::remove_var(BACKEND_URL_ENV);
        }
        Self {
            previous,
            _lock: lock,
        }
    }

    pub fn set_backend_url(&self, url: &str) {
        // SAFETY: the guard holds the global env lock.
        unsafe {
            std::env::set_var(BACKEND_URL_ENV, url);
        }
    }
}

impl Drop for DeeptoneEnvGuard {
    fn drop(&mut self) {
        for (key, value) in self.previous.drain(..) {
            // SAFETY: tests run under a global lock to prevent concurrent env mutations.
            unsafe {
                match value {
                    Some(value) => std::env::set_var(key, value),
                    None => std::env::remove_var(key),
                }
            }
        }
    }
}
