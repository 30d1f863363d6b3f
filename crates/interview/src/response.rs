use serde::{Deserialize, Serialize};

/// A complete reply from the interview service.
///
/// Replies are delivered in one piece; there is no token-level streaming.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct InterviewReply {
    /// The reply text, which may contain lightweight markup such as
    /// `•` bullets and `**_emphasis_**` spans.
    pub message: String,
}

impl InterviewReply {
    /// Creates a reply with the given text.
    #[inline]
    pub fn new<S: Into<String>>(message: S) -> Self {
        Self {
            message: message.into(),
        }
    }
}
