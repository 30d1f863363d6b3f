use diligence_chat_interview::ErrorKind;
use serde::{Deserialize, Serialize};

/// How the fake service answers one request.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum PresetReply {
    /// Reply with the given text.
    #[serde(rename = "message")]
    Message(String),
    /// Fail with an error of the given kind.
    #[serde(rename = "failure")]
    Failure(ErrorKind),
    /// Never resolve.
    #[serde(rename = "hang")]
    Hang,
}

impl PresetReply {
    /// Creates a `PresetReply` that answers with `text`.
    #[inline]
    pub fn message<S: Into<String>>(text: S) -> Self {
        Self::Message(text.into())
    }

    /// Creates a `PresetReply` that fails with a network error.
    #[inline]
    pub fn network_failure() -> Self {
        Self::Failure(ErrorKind::Network)
    }
}
