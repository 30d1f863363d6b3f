//! An interview service backed by a remote HTTP endpoint.

#[macro_use]
extern crate tracing;

mod config;
mod proto;

use std::error::Error as StdError;
use std::fmt::{self, Display};
use std::sync::Arc;

use diligence_chat_interview::{
    ErrorKind, InterviewReply, InterviewRequest, InterviewService,
    InterviewServiceError,
};
use mime::Mime;
use reqwest::{Client, Response, header};

pub use config::{HttpServiceConfig, HttpServiceConfigBuilder};

/// Error type for [`HttpInterviewService`].
#[derive(Debug)]
pub struct Error {
    message: String,
    kind: ErrorKind,
}

impl Error {
    fn new(message: impl Into<String>, kind: ErrorKind) -> Self {
        Self {
            message: message.into(),
            kind,
        }
    }

    fn from_reqwest(err: reqwest::Error) -> Self {
        let kind = if err.is_status() {
            ErrorKind::Status
        } else if err.is_decode() {
            ErrorKind::MalformedResponse
        } else {
            ErrorKind::Network
        };
        Self::new(format!("{err}"), kind)
    }

    /// Returns the error message.
    #[inline]
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl StdError for Error {}

impl InterviewServiceError for Error {
    #[inline]
    fn kind(&self) -> ErrorKind {
        self.kind
    }
}

/// Interview service reached over HTTP.
///
/// Each request is a single JSON `POST`; the reply is read in full before
/// it is handed back.
#[derive(Clone, Debug)]
pub struct HttpInterviewService {
    client: Client,
    config: Arc<HttpServiceConfig>,
}

impl HttpInterviewService {
    /// Creates a new `HttpInterviewService` with the given configuration.
    #[inline]
    pub fn new(config: HttpServiceConfig) -> Self {
        Self {
            client: Client::new(),
            config: Arc::new(config),
        }
    }
}

impl InterviewService for HttpInterviewService {
    type Error = Error;

    fn send_request(
        &self,
        req: &InterviewRequest,
    ) -> impl Future<Output = Result<InterviewReply, Self::Error>> + Send + 'static
    {
        let payload = proto::create_payload(req);
        let mut builder = self
            .client
            .post(&self.config.endpoint)
            .header(header::ACCEPT, "application/json")
            .json(&payload);
        if let Some(api_key) = &self.config.api_key {
            builder = builder.bearer_auth(api_key);
        }
        let resp_fut = builder.send();

        async move {
            let resp = match resp_fut.await.and_then(Response::error_for_status)
            {
                Ok(resp) => resp,
                Err(err) => return Err(Error::from_reqwest(err)),
            };

            let content_type = resp
                .headers()
                .get(header::CONTENT_TYPE)
                .and_then(|v| v.to_str().ok())
                .map(ToOwned::to_owned);
            if let Some(content_type) = &content_type {
                if !is_json_content_type(content_type) {
                    return Err(Error::new(
                        format!("Unexpected content type: {content_type:?}"),
                        ErrorKind::MalformedResponse,
                    ));
                }
            }

            let body = resp.bytes().await.map_err(Error::from_reqwest)?;
            trace!("got a reply body of {} bytes", body.len());
            proto::parse_reply(&body)
        }
    }
}

fn is_json_content_type(value: &str) -> bool {
    value
        .parse()
        .map(|m: Mime| {
            m.subtype() == mime::JSON || m.suffix() == Some(mime::JSON)
        })
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_json_content_type() {
        assert!(is_json_content_type("application/json"));
        assert!(is_json_content_type("application/json; charset=utf-8"));
        assert!(is_json_content_type("application/problem+json"));
        assert!(!is_json_content_type("text/html"));
        assert!(!is_json_content_type("not a mime"));
    }

    #[tokio::test]
    async fn test_unreachable_endpoint() {
        let config = HttpServiceConfigBuilder::with_base_url("http://127.0.0.1:9")
            .build();
        let service = HttpInterviewService::new(config);
        let req = InterviewRequest {
            analysis: "{}".to_owned(),
            history: vec![],
        };
        let err = service.send_request(&req).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Network);
        assert!(!err.message().is_empty());
        assert_eq!(err.to_string(), err.message());
    }
}
