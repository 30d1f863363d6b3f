use serde::{Deserialize, Serialize};

/// The kind of error that occurred while talking to the interview service.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// The service could not be reached.
    Network,
    /// The service answered with a non-success status.
    Status,
    /// The service answered, but the payload could not be understood.
    MalformedResponse,
    /// Any other errors.
    Other,
}
