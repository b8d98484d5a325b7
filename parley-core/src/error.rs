use thiserror::Error;

/// Errors produced while turning a text frame into a [`crate::SignalMessage`].
#[derive(Error, Debug)]
pub enum DecodeError {
    /// The frame is not a JSON envelope with a `type`.
    #[error("malformed frame: {0}")]
    Json(#[from] serde_json::Error),

    /// A message type that requires a payload arrived without one.
    #[error("missing payload for `{0}`")]
    MissingPayload(String),

    /// The payload does not match the shape its type requires.
    #[error("invalid `{kind}` payload: {source}")]
    InvalidPayload {
        kind: String,
        #[source]
        source: serde_json::Error,
    },
}
