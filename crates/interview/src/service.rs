use std::error::Error;

use crate::error::ErrorKind;
use crate::request::InterviewRequest;
use crate::response::InterviewReply;

/// The error type for an interview service.
pub trait InterviewServiceError: Error + Send + Sync + 'static {
    /// Returns the kind of this error.
    fn kind(&self) -> ErrorKind;
}

/// A type that represents an interview service, which takes the analysis
/// record and the conversation so far, and produces the next reply.
///
/// Once the service is created, it should behave like a stateless object.
/// It can still have internal state, but callers should not rely on it,
/// and the service should be prepared for being dropped anytime.
pub trait InterviewService: Send + Sync {
    /// The error type that may be returned by the service.
    type Error: InterviewServiceError;

    /// Sends a request to the service.
    ///
    /// The returned future must not borrow from `self` or `req`, since
    /// callers usually drive it on a separate task.
    fn send_request(
        &self,
        req: &InterviewRequest,
    ) -> impl Future<Output = Result<InterviewReply, Self::Error>> + Send + 'static;
}
