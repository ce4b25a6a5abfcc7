use std::{io, path::PathBuf};

/// Label or identifier that does not belong to any known catalog entry.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("unknown {kind}: {value:?}")]
pub struct UnknownOption {
    pub kind: &'static str,
    pub value: String,
}

impl UnknownOption {
    pub(crate) fn new(kind: &'static str, value: &str) -> Self {
        Self {
            kind,
            value: value.to_string(),
        }
    }
}

/// Error returned by the order service HTTP client.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("transport error: {0}")]
    Transport(String),

    #[error("request timed out")]
    Timeout,

    #[error("unexpected status {status_code}: {text}")]
    Status { status_code: u16, text: String },

    #[error("malformed response: {0}")]
    Decode(String),
}

impl From<reqwest::Error> for ClientError {
    fn from(value: reqwest::Error) -> Self {
        if value.is_timeout() {
            Self::Timeout
        } else if value.is_decode() {
            Self::Decode(value.to_string())
        } else {
            Self::Transport(value.to_string())
        }
    }
}

/// Order form operation rejected before reaching the order service.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FormError {
    #[error("order draft is not valid")]
    Invalid,

    #[error("order submission is already in flight")]
    InFlight,

    #[error("no submission is in flight")]
    NotSubmitting,

    #[error(transparent)]
    UnknownOption(#[from] UnknownOption),

    #[error("{asset} is not available on {network}")]
    UnsupportedAsset { network: String, asset: String },
}

/// Error of the durable key-value store.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("store io error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("store file is corrupted: {0}")]
    Serde(#[from] serde_json::Error),

    #[error("no data directory available on this platform")]
    NoDataDir,
}

/// Invalid environment/CLI configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("environment configuration error: {0}")]
    Env(#[from] envy::Error),

    #[error("invalid API URL: {0}")]
    InvalidApiUrl(#[from] url::ParseError),

    #[error("card number length cannot be zero")]
    ZeroCardDigits,

    #[error(transparent)]
    Store(#[from] StoreError),
}
