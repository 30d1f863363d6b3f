//! A local fake interview service for testing purpose.

mod preset;

use std::error::Error as StdError;
use std::fmt::{self, Debug, Display, Formatter};
use std::future::pending;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use diligence_chat_interview::{
    ErrorKind, InterviewReply, InterviewRequest, InterviewService,
    InterviewServiceError,
};
use tokio::time::sleep;

pub use preset::*;

#[derive(Debug)]
pub struct Error {
    #[allow(dead_code)]
    message: &'static str,
    kind: ErrorKind,
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        Debug::fmt(self, f)
    }
}

impl StdError for Error {}

impl InterviewServiceError for Error {
    #[inline]
    fn kind(&self) -> ErrorKind {
        self.kind
    }
}

#[derive(Clone)]
enum ConversationStep {
    UserInput,
    Reply(PresetReply),
}

/// A local fake interview service for testing purpose.
///
/// Before sending requests, you need to setup the conversation script, which
/// is how the service should respond to a request. The step is selected by
/// the length of the history in the request: the opening request (empty
/// history) picks step 0, the request after the first user message picks
/// step 2, and so on. If there are no enough steps in the script, or the
/// selected step is a user input step, an error will be returned.
///
/// Every request is recorded and can be inspected with [`requests`].
///
/// [`requests`]: TestInterviewService::requests
#[derive(Clone, Default)]
pub struct TestInterviewService {
    conversation_script: Vec<ConversationStep>,
    delay: Option<Duration>,
    request_log: Arc<Mutex<Vec<InterviewRequest>>>,
}

impl TestInterviewService {
    #[inline]
    pub fn add_reply_step(&mut self, preset: PresetReply) {
        self.conversation_script
            .push(ConversationStep::Reply(preset));
    }

    #[inline]
    pub fn add_user_input_step(&mut self) {
        self.conversation_script.push(ConversationStep::UserInput);
    }

    #[inline]
    pub fn set_delay(&mut self, duration: Duration) {
        self.delay = Some(duration);
    }

    /// Returns all requests received so far, oldest first.
    pub fn requests(&self) -> Vec<InterviewRequest> {
        self.request_log
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn select_reply(&self, req: &InterviewRequest) -> Result<PresetReply, Error> {
        let step_idx = req.history.len();
        match self.conversation_script.get(step_idx) {
            Some(ConversationStep::Reply(preset)) => Ok(preset.clone()),
            Some(ConversationStep::UserInput) => Err(Error {
                message: "not a reply step",
                kind: ErrorKind::Other,
            }),
            None => Err(Error {
                message: "no enough steps",
                kind: ErrorKind::Other,
            }),
        }
    }
}

impl InterviewService for TestInterviewService {
    type Error = crate::Error;

    fn send_request(
        &self,
        req: &InterviewRequest,
    ) -> impl Future<Output = Result<InterviewReply, Self::Error>> + Send + 'static
    {
        self.request_log
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(req.clone());

        let selected = self.select_reply(req);
        let delay = self.delay.unwrap_or(Duration::from_millis(1));
        async move {
            sleep(delay).await;
            match selected? {
                PresetReply::Message(text) => Ok(InterviewReply::new(text)),
                PresetReply::Failure(kind) => Err(Error {
                    message: "preset failure",
                    kind,
                }),
                PresetReply::Hang => pending().await,
            }
        }
    }
}
