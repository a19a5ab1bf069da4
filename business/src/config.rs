use std::path::PathBuf;

use log::info;
use roster_states::State;
use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read configuration from environment: {0}")]
    Env(#[from] serde_env::Error),

    #[error("{name} must not be empty")]
    EmptyUrl { name: &'static str },
}

/// Service endpoints and the session store location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BusinessConfig {
    pub auth_api_url: String,
    pub users_api_url: String,
    /// `None` keeps the session in memory only.
    pub storage_path: Option<PathBuf>,
}

impl State for BusinessConfig {}

/// Environment overrides. Every field is optional.
#[derive(Debug, Default, Deserialize)]
struct RawConfig {
    roster_auth_api_url: Option<String>,
    roster_users_api_url: Option<String>,
    roster_storage_path: Option<PathBuf>,
}

impl BusinessConfig {
    pub fn new(auth_api_url: impl Into<String>, users_api_url: impl Into<String>) -> Self {
        Self {
            auth_api_url: trim_url(auth_api_url.into()),
            users_api_url: trim_url(users_api_url.into()),
            storage_path: None,
        }
    }

    pub fn with_storage_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.storage_path = Some(path.into());
        self
    }

    /// Compiled-in defaults overlaid with `ROSTER_AUTH_API_URL`, `ROSTER_USERS_API_URL` and
    /// `ROSTER_STORAGE_PATH`.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(std::env::vars())
    }

    pub fn from_vars(
        vars: impl IntoIterator<Item = (String, String)>,
    ) -> Result<Self, ConfigError> {
        let raw: RawConfig = serde_env::from_iter(vars)?;
        Self::from_raw(raw)
    }

    fn from_raw(raw: RawConfig) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(url) = raw.roster_auth_api_url {
            let url = trim_url(url);
            if url.is_empty() {
                return Err(ConfigError::EmptyUrl {
                    name: "ROSTER_AUTH_API_URL",
                });
            }
            info!("Using auth service from environment: {url}");
            config.auth_api_url = url;
        }

        if let Some(url) = raw.roster_users_api_url {
            let url = trim_url(url);
            if url.is_empty() {
                return Err(ConfigError::EmptyUrl {
                    name: "ROSTER_USERS_API_URL",
                });
            }
            info!("Using user service from environment: {url}");
            config.users_api_url = url;
        }

        if let Some(path) = raw.roster_storage_path {
            config.storage_path = Some(path);
        }

        Ok(config)
    }
}

fn trim_url(url: String) -> String {
    url.trim().trim_end_matches('/').to_owned()
}

impl Default for BusinessConfig {
    fn default() -> Self {
        let (auth, users) = if cfg!(feature = "env_test") {
            (
                "https://auth.roster-test.internal",
                "https://users.roster-test.internal",
            )
        } else if cfg!(feature = "env_nightly") {
            (
                "https://auth.roster-nightly.internal",
                "https://users.roster-nightly.internal",
            )
        } else {
            ("http://localhost:8001", "http://localhost:8002")
        };

        Self {
            auth_api_url: auth.to_owned(),
            users_api_url: users.to_owned(),
            storage_path: crate::FileStore::default_path(),
        }
    }
}
