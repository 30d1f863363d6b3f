use std::fmt::{self, Display};

use serde::{Deserialize, Serialize};

/// A request to be sent to the interview service.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct InterviewRequest {
    /// The analysis record, serialized as JSON.
    pub analysis: String,
    /// Prior conversation, oldest first. Empty for the opening request.
    pub history: Vec<Message>,
}

/// Who authored a message.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// The human asking questions.
    User,
    /// The interview service.
    Model,
}

impl Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::User => "user".fmt(f),
            Role::Model => "model".fmt(f),
        }
    }
}

/// A complete message in the conversation.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Message {
    /// The author of this message.
    pub role: Role,
    /// The message text.
    pub content: String,
}

impl Message {
    /// Creates a message written by the user.
    #[inline]
    pub fn user<S: Into<String>>(content: S) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    /// Creates a message written by the interview service.
    #[inline]
    pub fn model<S: Into<String>>(content: S) -> Self {
        Self {
            role: Role::Model,
            content: content.into(),
        }
    }
}
