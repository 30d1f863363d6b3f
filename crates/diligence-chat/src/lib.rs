//! An out-of-the-box diligence chat that ties an analysis record to an
//! interview service.
//!
//! The crate includes a CLI tool for using in the terminal. And you can also
//! use it as a library to bring the chat into your own host apps.

#![deny(missing_docs)]

#[allow(unused_imports)]
#[macro_use]
extern crate tracing;

pub mod render;
mod session;

pub use session::{Session, SessionBuilder};

/// Re-exports of [`diligence_chat_core`] crate.
pub mod core {
    pub use diligence_chat_core::*;
}
