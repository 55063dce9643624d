//! Error types for the simulation.

use crate::types::{ColliderHandle, ColliderKind};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("No collider of kind {0} has ever been registered")]
    KindNotPopulated(ColliderKind),

    #[error("Collider {0} is not registered")]
    UnknownHandle(ColliderHandle),

    #[error("No live plants available to mate with")]
    NoMatesAvailable,
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Serialization(err.to_string())
    }
}
