use std::pin::Pin;
use std::sync::Arc;

use diligence_chat_interview::{
    InterviewReply, InterviewRequest, InterviewService, InterviewServiceError,
};
use tracing::Instrument;

pub(crate) type SendRequestResult =
    Result<InterviewReply, Box<dyn InterviewServiceError>>;
pub(crate) type BoxedSendRequestFuture =
    Pin<Box<dyn Future<Output = SendRequestResult> + Send>>;
type HandlerFn =
    Arc<dyn Fn(InterviewRequest) -> BoxedSendRequestFuture + Send + Sync>;

/// A wrapper around an interview service that provides a type-erased
/// interface for the other modules.
#[derive(Clone)]
pub struct ServiceClient {
    handler_fn: HandlerFn,
}

impl ServiceClient {
    #[inline]
    pub fn new<S: InterviewService + 'static>(service: S) -> Self {
        // We have to erase the type `S`, since `ServiceClient` doesn't have a
        // generic parameter and we don't want it either.
        let handler_fn: HandlerFn = Arc::new(move |req| {
            let fut = service.send_request(&req);
            let history_len = req.history.len();
            Box::pin(
                async move {
                    trace!("sending a request with {history_len} messages");
                    handle_reply::<S>(fut.await)
                }
                .instrument(trace_span!("interview req")),
            )
        });
        Self { handler_fn }
    }

    /// Hands the request to the service and returns the pending reply.
    ///
    /// The service sees the request right away; only awaiting the reply is
    /// deferred to the returned future.
    ///
    /// # Cancel safety
    ///
    /// The returned future is cancel safe as long as the underlying
    /// service is.
    #[inline]
    pub fn send_request(
        &self,
        req: InterviewRequest,
    ) -> BoxedSendRequestFuture {
        (self.handler_fn)(req)
    }
}

fn handle_reply<S: InterviewService + 'static>(
    reply_or_err: Result<InterviewReply, S::Error>,
) -> SendRequestResult {
    match reply_or_err {
        Ok(reply) => {
            trace!("got a reply of {} bytes", reply.message.len());
            Ok(reply)
        }
        Err(err) => {
            error!("got an error ({:?}): {err}", err.kind());
            Err(Box::new(err))
        }
    }
}

#[cfg(test)]
mod tests {
    use diligence_chat_interview::{ErrorKind, Message};
    use diligence_chat_test_service::{PresetReply, TestInterviewService};

    use super::*;

    #[tokio::test]
    async fn test_send_request() {
        let mut service = TestInterviewService::default();
        service.add_reply_step(PresetReply::message("How can I help?"));

        let client = ServiceClient::new(service.clone());
        for _ in 0..3 {
            let reply = client
                .send_request(InterviewRequest {
                    analysis: "{}".to_owned(),
                    history: vec![],
                })
                .await
                .unwrap();
            assert_eq!(reply.message, "How can I help?");
        }
        assert_eq!(service.requests().len(), 3);
    }

    #[tokio::test]
    async fn test_error_handling() {
        let service = TestInterviewService::default();
        let client = ServiceClient::new(service);
        let reply_or_err = client
            .send_request(InterviewRequest {
                analysis: "{}".to_owned(),
                history: vec![Message::user("Hi")],
            })
            .await;
        assert_eq!(reply_or_err.unwrap_err().kind(), ErrorKind::Other);
    }
}
