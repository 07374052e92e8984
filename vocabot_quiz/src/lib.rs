#![deny(
    clippy::all,
    clippy::nursery,
    clippy::pedantic,
    clippy::style,
    clippy::complexity,
    clippy::perf,
    clippy::correctness,
    clippy::suspicious,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(
    clippy::similar_names,
    clippy::missing_safety_doc,
    clippy::missing_panics_doc,
    clippy::missing_errors_doc
)]

//! Vocabulary quiz sessions.
//!
//! [`QuizEngine`] owns the per-chat state machine: it shows cards, checks
//! answers and walks users through adding or removing words. The transport
//! only converts messages into [`InboundEvent`]s and renders the [`Reply`].

mod dialog;
mod engine;
pub mod messages;
pub mod router;
pub mod session;

pub use dialog::{ConfirmationCheck, SourceWordCheck, check_confirmation, check_source_word};
pub use engine::{InboundEvent, QuizEngine, Reply};
pub use router::{Action, Input, route};
pub use session::{Card, Dialog, Phase, SessionState, SessionStore};
