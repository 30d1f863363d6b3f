//! The protocol spoken with the remote interview service.
//!
//! The interview service is the party that actually asks and answers
//! diligence questions about a startup. This crate only describes the
//! shape of the exchange (a serialized analysis record plus the chat
//! history going in, a single reply coming out), so that the conversation
//! logic can be driven by a real HTTP backend or a scripted fake alike.
//!
//! Types in this crate don't define any behavior, instead they are the
//! constraints that the implementors should adhere to.

#![deny(missing_docs)]

mod error;
mod request;
mod response;
mod service;

pub use error::*;
pub use request::*;
pub use response::*;
pub use service::*;
