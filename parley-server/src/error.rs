use parley_core::{DecodeError, UserId};
use thiserror::Error;

/// Failures of a single transport connection.
#[derive(Error, Debug)]
pub enum TransportError {
    #[error("connection closed")]
    Closed,

    #[error("transport error: {0}")]
    Io(String),
}

impl From<axum::Error> for TransportError {
    fn from(e: axum::Error) -> Self {
        TransportError::Io(e.to_string())
    }
}

/// Why a connection was not admitted into the registry.
#[derive(Error, Debug)]
pub enum AdmissionError {
    #[error("connection closed before join")]
    ClosedBeforeJoin,

    #[error("no join frame within {0:?}")]
    JoinTimeout(std::time::Duration),

    #[error("transport failed during join: {0}")]
    Transport(#[from] TransportError),

    #[error("malformed join frame: {0}")]
    Malformed(#[from] DecodeError),

    #[error("first frame must be join, got `{0}`")]
    NotJoin(String),

    #[error("join carried no identity")]
    EmptyIdentity,

    #[error("identity `{0}` is already connected")]
    IdentityTaken(UserId),

    #[error(transparent)]
    RegistryUnavailable(#[from] RegistryClosed),
}

/// The registry event loop has stopped and no longer accepts commands.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("registry is not running")]
pub struct RegistryClosed;
