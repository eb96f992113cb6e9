use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("request for `{key}` failed: {source}")]
    Request {
        key: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("store answered `{key}` with status {status}")]
    Status {
        key: String,
        status: reqwest::StatusCode,
    },
    #[error("store returned malformed JSON for `{key}`: {source}")]
    Decode {
        key: String,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("environment variable {0} is not set")]
    Missing(&'static str),
    #[error("environment variable {name} has invalid value `{value}`")]
    Invalid { name: &'static str, value: String },
}
