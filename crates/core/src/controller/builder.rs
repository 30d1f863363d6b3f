use diligence_chat_interview::InterviewService;
use tokio::sync::{mpsc, watch};
use tracing::Instrument;

use super::state::{ControllerState, Fallbacks, run_controller};
use super::{ConversationController, OPENING_FALLBACK, REPLY_FALLBACK};
use crate::conversation::ConversationState;
use crate::record::AnalysisRecord;
use crate::service_client::ServiceClient;

/// [`ConversationController`] builder.
pub struct ControllerBuilder {
    client: ServiceClient,
    on_idle: Option<Box<dyn Fn() + Send + Sync>>,
    fallbacks: Fallbacks,
}

impl ControllerBuilder {
    /// Creates a new builder with the specified interview service.
    #[inline]
    pub fn with_interview_service<S: InterviewService + 'static>(
        service: S,
    ) -> Self {
        Self {
            client: ServiceClient::new(service),
            on_idle: None,
            fallbacks: Fallbacks {
                opening: OPENING_FALLBACK.to_owned(),
                reply: REPLY_FALLBACK.to_owned(),
            },
        }
    }

    /// Attaches a callback to be invoked whenever the conversation becomes
    /// idle, i.e. a reply or a fallback message has been appended.
    #[inline]
    pub fn on_idle(
        mut self,
        on_idle: impl Fn() + Send + Sync + 'static,
    ) -> Self {
        self.on_idle = Some(Box::new(on_idle));
        self
    }

    /// Overrides the message shown when the opening request fails.
    #[inline]
    pub fn with_opening_fallback<S: Into<String>>(mut self, text: S) -> Self {
        self.fallbacks.opening = text.into();
        self
    }

    /// Overrides the message shown when a reply request fails.
    #[inline]
    pub fn with_reply_fallback<S: Into<String>>(mut self, text: S) -> Self {
        self.fallbacks.reply = text.into();
        self
    }

    /// Spawns the controller and starts a conversation about `record`.
    ///
    /// Must be called within a tokio runtime.
    pub fn build(self, record: AnalysisRecord) -> ConversationController {
        let Self {
            client,
            on_idle,
            fallbacks,
        } = self;

        let (cmd_tx, cmd_rx) = mpsc::unbounded_channel();
        let (kill_tx, kill_rx) = watch::channel(false);
        let (state_tx, state_rx) = watch::channel(ConversationState::default());

        let state = ControllerState::new(
            client,
            fallbacks,
            on_idle,
            state_tx,
            cmd_tx.clone(),
        );
        tokio::spawn(
            run_controller(state, cmd_rx, kill_rx)
                .instrument(trace_span!("controller")),
        );

        let controller = ConversationController {
            cmd_tx,
            kill_tx,
            state_rx,
        };
        controller.start(record);
        controller
    }
}
