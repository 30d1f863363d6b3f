use diligence_chat_interview::{
    ErrorKind, InterviewReply, InterviewRequest, Message,
};
use serde::{Deserialize, Serialize};

use crate::Error;

// ------------------------------
// Types received from the server
// ------------------------------

#[derive(Clone, Debug, PartialEq, Eq, Hash, Deserialize)]
pub struct ReplyPayload {
    pub message: Option<String>,
}

// ------------------------
// Types sent to the server
// ------------------------

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct InterviewPayload {
    analysis: String,
    history: Vec<Message>,
}

// -----------
// Conversions
// -----------

#[inline]
pub fn create_payload(req: &InterviewRequest) -> InterviewPayload {
    InterviewPayload {
        analysis: req.analysis.clone(),
        history: req.history.clone(),
    }
}

pub fn parse_reply(body: &[u8]) -> Result<InterviewReply, Error> {
    let payload: ReplyPayload = serde_json::from_slice(body).map_err(|err| {
        Error::new(
            format!("invalid reply body: {err}"),
            ErrorKind::MalformedResponse,
        )
    })?;
    let Some(message) = payload.message else {
        return Err(Error::new(
            "reply body has no `message` field",
            ErrorKind::MalformedResponse,
        ));
    };
    Ok(InterviewReply { message })
}
