//! Runtime configuration.
//!
//! Values come from `LATEST_CAPTURE_*` environment variables (a `.env` file is
//! loaded by the binary first) and can be overridden per invocation by CLI
//! flags.

use std::net::SocketAddr;
use std::path::PathBuf;

use crate::cli::ConfigArgs;
use crate::error::ConfigError;

/// Root directory variable.
pub const ROOT_VAR: &str = "LATEST_CAPTURE_ROOT";
/// Public base URL variable.
pub const BASE_URL_VAR: &str = "LATEST_CAPTURE_BASE_URL";
/// Listen address variable.
pub const BIND_VAR: &str = "LATEST_CAPTURE_BIND";
/// Viewer refresh interval variable.
pub const REFRESH_VAR: &str = "LATEST_CAPTURE_REFRESH_SECS";

const DEFAULT_ROOT: &str = "./himawari";
const DEFAULT_BASE_URL: &str = "http://localhost:8080/";
const DEFAULT_BIND: &str = "127.0.0.1:8080";

/// Default viewer auto-refresh interval (15 minutes).
pub const DEFAULT_REFRESH_SECS: u64 = 900;

/// Settings handed to the lookup endpoint, the viewer and the server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Directory holding the `YYYYMMDD` capture folders.
    pub root: PathBuf,
    /// Base URL, always ending in `/`.
    pub base_url: String,
    /// Server listen address.
    pub bind: SocketAddr,
    /// Viewer auto-refresh interval in seconds.
    pub refresh_secs: u64,
}

impl Config {
    /// Loads the configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns an error if a variable is set to an unusable value.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Loads the configuration through an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Returns an error if a variable is set to an unusable value.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let root = lookup(ROOT_VAR).map_or_else(|| PathBuf::from(DEFAULT_ROOT), PathBuf::from);

        let base_url = match lookup(BASE_URL_VAR) {
            Some(url) if url.trim().is_empty() => return Err(ConfigError::EmptyBaseUrl(BASE_URL_VAR)),
            Some(url) => normalize_base_url(url.trim()),
            None => DEFAULT_BASE_URL.to_string(),
        };

        let bind_value = lookup(BIND_VAR).unwrap_or_else(|| DEFAULT_BIND.to_string());
        let bind = bind_value
            .parse()
            .map_err(|_| ConfigError::InvalidBind { var: BIND_VAR, value: bind_value.clone() })?;

        let refresh_secs = match lookup(REFRESH_VAR) {
            Some(value) => match value.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => secs,
                _ => return Err(ConfigError::InvalidRefresh { var: REFRESH_VAR, value }),
            },
            None => DEFAULT_REFRESH_SECS,
        };

        Ok(Self { root, base_url, bind, refresh_secs })
    }

    /// Applies CLI flag overrides on top of the loaded values.
    #[must_use]
    pub fn with_overrides(mut self, args: &ConfigArgs) -> Self {
        if let Some(root) = &args.root {
            self.root.clone_from(root);
        }
        if let Some(url) = &args.base_url {
            self.base_url = normalize_base_url(url);
        }
        if let Some(bind) = args.bind {
            self.bind = bind;
        }
        if let Some(refresh) = args.refresh {
            self.refresh_secs = refresh;
        }
        self
    }
}

fn normalize_base_url(url: &str) -> String {
    if url.ends_with('/') {
        url.to_string()
    } else {
        format!("{url}/")
    }
}
