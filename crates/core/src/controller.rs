mod builder;
mod state;

use tokio::sync::{mpsc, oneshot, watch};

pub use builder::ControllerBuilder;
use state::Command;

use crate::conversation::ConversationState;
use crate::record::AnalysisRecord;

/// Shown in place of the opening message when it could not be fetched.
pub const OPENING_FALLBACK: &str = "Sorry, I couldn't start the interview \
    right now. Please try again in a moment.";

/// Shown in place of a reply when it could not be fetched.
pub const REPLY_FALLBACK: &str =
    "Sorry, something went wrong while getting a reply. Please try again.";

/// Drives a conversation with the interview service about one analysis
/// record at a time.
///
/// The controller runs on its own task and is driven by commands. Commands
/// are handled in the order they are issued, immediately, no matter what
/// stage the conversation is in; a command that does not apply to the
/// current stage (e.g. sending while a reply is awaited) is ignored.
///
/// At most one request is in flight at a time, so replies are appended in
/// the order their requests were issued. Service failures never escape the
/// controller: they turn into a fallback message in the history.
///
/// Dropping the controller tears the conversation down and aborts any
/// request in flight. Nothing is persisted.
pub struct ConversationController {
    cmd_tx: mpsc::UnboundedSender<Command>,
    kill_tx: watch::Sender<bool>,
    state_rx: watch::Receiver<ConversationState>,
}

impl ConversationController {
    /// Discards the current conversation and starts a new one about
    /// `record` by fetching the opening message.
    #[inline]
    pub fn start(&self, record: AnalysisRecord) {
        self.dispatch(Command::Start(record));
    }

    /// Sends a user message.
    ///
    /// The message shows up in the history right away, before the reply
    /// arrives. Blank messages are ignored, and so is any message sent
    /// while a request is already in flight.
    #[inline]
    pub fn send<S: Into<String>>(&self, text: S) {
        self.dispatch(Command::Send(text.into()));
    }

    /// Replaces the text the user has typed but not sent yet.
    #[inline]
    pub fn set_pending_input<S: Into<String>>(&self, text: S) {
        self.dispatch(Command::SetPendingInput(text.into()));
    }

    /// Sends the pending input, see [`send`](Self::send).
    #[inline]
    pub fn submit_pending_input(&self) {
        self.dispatch(Command::SubmitPendingInput);
    }

    /// Returns a receiver that observes every state change.
    #[inline]
    pub fn subscribe(&self) -> watch::Receiver<ConversationState> {
        self.state_rx.clone()
    }

    /// Returns the most recently published state.
    #[inline]
    pub fn state(&self) -> ConversationState {
        self.state_rx.borrow().clone()
    }

    /// Returns the state once every command issued before this call has
    /// been handled, or `None` if the controller task is gone.
    pub async fn snapshot(&self) -> Option<ConversationState> {
        let (tx, rx) = oneshot::channel();
        self.dispatch(Command::Snapshot(tx));
        rx.await.ok()
    }

    fn dispatch(&self, cmd: Command) {
        if let Err(err) = self.cmd_tx.send(cmd) {
            warn!("controller task has stopped, dropping {:?}", err.0);
        }
    }
}

impl Drop for ConversationController {
    fn drop(&mut self) {
        self.kill_tx.send(true).ok();
    }
}
