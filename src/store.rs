//! Read side of the remote key-value store.

use log::debug;
use reqwest::blocking::Client;
use reqwest::{StatusCode, Url};
use serde_json::Value;

use crate::config::Config;
use crate::error::StoreError;

pub trait KeyValueStore {
    /// Current value under `key`. `Ok(None)` means the key holds null or is absent.
    fn get(&mut self, key: &str) -> Result<Option<String>, StoreError>;
}

/// Firebase Realtime Database, read through its REST interface.
pub struct FirebaseStore {
    client: Client,
    base_url: Url,
}

impl FirebaseStore {
    pub fn new(config: &Config) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(config.http_timeout).build()?;
        Ok(FirebaseStore {
            client,
            base_url: config.database_url.clone(),
        })
    }
}

impl KeyValueStore for FirebaseStore {
    fn get(&mut self, key: &str) -> Result<Option<String>, StoreError> {
        let url = endpoint(&self.base_url, key);
        let response = self
            .client
            .get(url)
            .send()
            .map_err(|source| StoreError::Request {
                key: key.to_owned(),
                source,
            })?;

        check_status(key, response.status())?;

        let body = response.text().map_err(|source| StoreError::Request {
            key: key.to_owned(),
            source,
        })?;
        debug!("GET {key} -> {}", body.trim());
        decode_value(key, &body)
    }
}

/// `{base path}/{key}.json`, keeping the base URL's query string.
fn endpoint(base_url: &Url, key: &str) -> Url {
    let mut url = base_url.clone();
    let path = format!("{}/{}.json", base_url.path().trim_end_matches('/'), key);
    url.set_path(&path);
    url
}

fn check_status(key: &str, status: StatusCode) -> Result<(), StoreError> {
    if status.is_success() {
        Ok(())
    } else {
        Err(StoreError::Status {
            key: key.to_owned(),
            status,
        })
    }
}

/// Strings come back unquoted; any other JSON value is kept as its JSON text.
fn decode_value(key: &str, body: &str) -> Result<Option<String>, StoreError> {
    match serde_json::from_str::<Value>(body) {
        Ok(Value::Null) => Ok(None),
        Ok(Value::String(value)) => Ok(Some(value)),
        Ok(other) => Ok(Some(other.to_string())),
        Err(source) => Err(StoreError::Decode {
            key: key.to_owned(),
            source,
        }),
    }
}
