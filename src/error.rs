// filepath: src/error.rs
//! Error type for scan-overlay

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid framing rect ({left}, {top}, {right}, {bottom}): width and height must be positive")]
    InvalidRect {
        left: i32,
        top: i32,
        right: i32,
        bottom: i32,
    },

    #[error("config I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("failed to serialize config: {0}")]
    ConfigSerialize(#[from] toml::ser::Error),

    #[error("event loop error: {0}")]
    EventLoop(#[from] calloop::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
