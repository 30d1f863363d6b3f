//! Core logic of the diligence chat: deriving identity and contact details
//! from an analysis record, formatting replies, and driving the
//! conversation with the interview service.

#![deny(missing_docs)]
#![deny(clippy::missing_safety_doc)]

#[macro_use]
extern crate tracing;

mod controller;
pub mod conversation;
pub mod format;
pub mod harvest;
pub mod identity;
pub mod mail;
pub mod record;
mod service_client;

pub use controller::{
    ControllerBuilder, ConversationController, OPENING_FALLBACK,
    REPLY_FALLBACK,
};
pub use conversation::{ConversationState, Stage};
pub use diligence_chat_interview::{Message, Role};
pub use format::{Block, Span, TextBlockFormatter};
pub use harvest::{EmailHarvester, EmailList};
pub use identity::{IdentityResolver, NameLimits, ResolvedIdentity};
pub use mail::{MailDraft, compose};
pub use record::AnalysisRecord;
