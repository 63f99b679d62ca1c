//! Credentials and TOML-based settings.
//!
//! Credentials always come from the environment:
//! - `SEVENSHIFTS_ACCESS_TOKEN`: bearer token for the 7shifts API
//! - `SEVENSHIFTS_COMPANY_ID`: tenant the task lists belong to
//!
//! Everything else is optional and read from `~/.config/shiftboard/config.toml`
//! (or the file named by `SHIFTBOARD_CONFIG`). A missing file means defaults.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::ConfigError;

pub const ACCESS_TOKEN_ENV: &str = "SEVENSHIFTS_ACCESS_TOKEN";
pub const COMPANY_ID_ENV: &str = "SEVENSHIFTS_COMPANY_ID";
pub const CONFIG_PATH_ENV: &str = "SHIFTBOARD_CONFIG";

/// API credentials for the upstream task-list service.
#[derive(Clone)]
pub struct Credentials {
    pub access_token: String,
    pub company_id: String,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("access_token", &"<redacted>")
            .field("company_id", &self.company_id)
            .finish()
    }
}

impl Credentials {
    /// Read credentials from the process environment.
    ///
    /// # Errors
    /// Returns [`ConfigError::MissingEnv`] naming the first variable that is
    /// unset or empty.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Read credentials through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |name: &str| {
            lookup(name)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .ok_or_else(|| ConfigError::MissingEnv(name.to_string()))
        };
        Ok(Self {
            access_token: required(ACCESS_TOKEN_ENV)?,
            company_id: required(COMPANY_ID_ENV)?,
        })
    }
}

/// Application settings.
///
/// Serialized to/from TOML at `~/.config/shiftboard/config.toml`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// API root, without trailing slash.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Per-request timeout; a timed-out day becomes a warning.
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
    /// Re-poll interval for `dashboard --watch`.
    #[serde(default = "default_refresh_interval_secs")]
    pub refresh_interval_secs: u64,
    /// Used when the caller passes no location ids.
    #[serde(default)]
    pub default_location_ids: Vec<String>,
}

fn default_base_url() -> String {
    "https://api.7shifts.com/v2".into()
}
fn default_request_timeout_secs() -> u64 {
    20
}
fn default_refresh_interval_secs() -> u64 {
    15
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            request_timeout_secs: default_request_timeout_secs(),
            refresh_interval_secs: default_refresh_interval_secs(),
            default_location_ids: Vec::new(),
        }
    }
}

impl Settings {
    /// Settings file location: `SHIFTBOARD_CONFIG` if set, otherwise
    /// `~/.config/shiftboard/config.toml`.
    pub fn path() -> PathBuf {
        if let Ok(p) = std::env::var(CONFIG_PATH_ENV) {
            if !p.trim().is_empty() {
                return PathBuf::from(p);
            }
        }
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".config")
            .join("shiftboard")
            .join("config.toml")
    }

    /// Load from the default location.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::path())
    }

    /// Load from `path`, returning defaults when the file does not exist.
    ///
    /// # Errors
    /// Unreadable files, TOML syntax errors and out-of-range values are all
    /// configuration errors.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::LoadFailed {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        let settings: Settings = toml::from_str(&content).map_err(|e| ConfigError::ParseFailed {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        settings.validate()?;
        Ok(settings)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        url::Url::parse(&self.base_url).map_err(|e| ConfigError::InvalidValue {
            key: "base_url".into(),
            message: e.to_string(),
        })?;
        if self.request_timeout_secs == 0 {
            return Err(ConfigError::InvalidValue {
                key: "request_timeout_secs".into(),
                message: "must be greater than zero".into(),
            });
        }
        if self.refresh_interval_secs == 0 {
            return Err(ConfigError::InvalidValue {
                key: "refresh_interval_secs".into(),
                message: "must be greater than zero".into(),
            });
        }
        Ok(())
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn refresh_interval(&self) -> Duration {
        Duration::from_secs(self.refresh_interval_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn test_credentials_present() {
        let creds = Credentials::from_lookup(lookup(&[
            (ACCESS_TOKEN_ENV, "tok"),
            (COMPANY_ID_ENV, "42"),
        ]))
        .unwrap();
        assert_eq!(creds.access_token, "tok");
        assert_eq!(creds.company_id, "42");
    }

    #[test]
    fn test_missing_token_fails_fast() {
        let err = Credentials::from_lookup(lookup(&[(COMPANY_ID_ENV, "42")])).unwrap_err();
        assert!(matches!(err, ConfigError::MissingEnv(ref n) if n == ACCESS_TOKEN_ENV));
    }

    #[test]
    fn test_empty_company_counts_as_missing() {
        let err = Credentials::from_lookup(lookup(&[
            (ACCESS_TOKEN_ENV, "tok"),
            (COMPANY_ID_ENV, "  "),
        ]))
        .unwrap_err();
        assert_eq!(err.to_string(), "Missing env SEVENSHIFTS_COMPANY_ID");
    }

    #[test]
    fn test_debug_redacts_token() {
        let creds = Credentials {
            access_token: "secret".into(),
            company_id: "1".into(),
        };
        assert!(!format!("{creds:?}").contains("secret"));
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let settings: Settings = toml::from_str("request_timeout_secs = 5").unwrap();
        assert_eq!(settings.request_timeout_secs, 5);
        assert_eq!(settings.base_url, "https://api.7shifts.com/v2");
        assert_eq!(settings.refresh_interval_secs, 15);
        assert!(settings.default_location_ids.is_empty());
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let settings = Settings {
            request_timeout_secs: 0,
            ..Settings::default()
        };
        assert!(matches!(
            settings.validate(),
            Err(ConfigError::InvalidValue { ref key, .. }) if key == "request_timeout_secs"
        ));
    }
}
