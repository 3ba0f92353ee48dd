use std::str::Utf8Error;
use thiserror::Error;

/// Why a record value could not be turned into an [`crate::ActivityEvent`].
///
/// The `Display` text is what the console shows in place of the event.
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("Empty message payload")]
    EmptyPayload,

    #[error("Message is not valid UTF-8 ({0}); it may be compressed or binary")]
    InvalidUtf8(#[from] Utf8Error),

    #[error("Invalid JSON message: {0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error("Invalid JSON message: expected an object, found {0}")]
    NotAnObject(&'static str),
}
