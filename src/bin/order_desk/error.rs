//! Error types for the order desk.

use p2p_desk::error::{ClientError, ConfigError};

/// Main error type for the order desk.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Order service client error: {0}")]
    Client(#[from] ClientError),

    #[error("Terminal error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Submission channel closed unexpectedly")]
    ChannelClosed,
}

pub type Result<T> = std::result::Result<T, Error>;
