//! Error types for the simulation.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid grid dimension: {size} (must be a positive integer)")]
    InvalidDimension { size: i64 },

    #[error("Invalid tree count: {count} (must be a positive integer)")]
    InvalidTreeCount { count: i64 },

    #[error("No simulation: generate a forest first")]
    NoSimulation,

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Serialization(err.to_string())
    }
}
