//! The shared-file wire format and the mailbox that carries it between the
//! UI process and external AI agents.

pub mod codec;
mod mailbox;

pub use codec::{MoveToken, Snapshot, WireExpectation, WireHeader};
pub use mailbox::Mailbox;
