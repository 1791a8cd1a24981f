//! Client error types

use board_overlay::GeometryError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Service returned HTTP {0}: {1}")]
    Status(u16, String),

    #[error("Malformed response body: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("No candidate moves in response")]
    NoCandidates,

    #[error("Unusable candidate move: {0}")]
    Geometry(#[from] GeometryError),
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{name} has invalid value {value:?}")]
    Invalid { name: &'static str, value: String },

    #[error("{name} is not a valid URL: {value:?}")]
    InvalidUrl { name: &'static str, value: String },
}

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum WaitError {
    #[error("Board wait cancelled by navigation")]
    Cancelled,
}
