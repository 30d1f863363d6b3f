//! Conversation-related types.

use diligence_chat_interview::Message;

/// Where the conversation is in its request/reply cycle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Stage {
    /// The opening message is being fetched; there is no history yet.
    #[default]
    Initializing,
    /// History is available and no request is in flight.
    Idle,
    /// A reply to the latest user message is being fetched.
    Awaiting,
}

/// Snapshot of a conversation, as exposed to the display surface.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ConversationState {
    pub(crate) history: Vec<Message>,
    pub(crate) pending_input: String,
    pub(crate) stage: Stage,
}

impl ConversationState {
    /// All messages so far, oldest first. Only ever appended to.
    #[inline]
    pub fn history(&self) -> &[Message] {
        &self.history
    }

    /// Text typed by the user but not sent yet.
    #[inline]
    pub fn pending_input(&self) -> &str {
        &self.pending_input
    }

    /// The current stage.
    #[inline]
    pub fn stage(&self) -> Stage {
        self.stage
    }

    /// Returns `true` while a request is in flight, so a waiting
    /// indicator should be shown.
    #[inline]
    pub fn is_awaiting_reply(&self) -> bool {
        self.stage != Stage::Idle
    }

    /// The latest message, if any.
    #[inline]
    pub fn last_message(&self) -> Option<&Message> {
        self.history.last()
    }
}
