use std::env;
use std::time::Duration;

use reqwest::Url;

use crate::error::ConfigError;

pub const DATABASE_URL_VAR: &str = "FIREBASE_DATABASE_URL";
pub const HTTP_TIMEOUT_VAR: &str = "REMOTE_SWITCH_HTTP_TIMEOUT_SECS";
pub const DEFAULT_HTTP_TIMEOUT: Duration = Duration::from_secs(5);

/// Runtime settings for reaching the remote store. Pins and keys are fixed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Database root. A query string (e.g. `?auth=...`) is kept and sent with every read.
    pub database_url: Url,
    pub http_timeout: Duration,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let raw_url = lookup(DATABASE_URL_VAR)
            .map(|url| url.trim().to_owned())
            .filter(|url| !url.is_empty())
            .ok_or(ConfigError::Missing(DATABASE_URL_VAR))?;
        let database_url = match Url::parse(&raw_url) {
            Ok(url) if matches!(url.scheme(), "http" | "https") && !url.cannot_be_a_base() => url,
            _ => {
                return Err(ConfigError::Invalid {
                    name: DATABASE_URL_VAR,
                    value: raw_url,
                });
            }
        };

        let http_timeout = match lookup(HTTP_TIMEOUT_VAR) {
            None => DEFAULT_HTTP_TIMEOUT,
            Some(raw) => match raw.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => Duration::from_secs(secs),
                _ => {
                    return Err(ConfigError::Invalid {
                        name: HTTP_TIMEOUT_VAR,
                        value: raw,
                    });
                }
            },
        };

        Ok(Config {
            database_url,
            http_timeout,
        })
    }
}
