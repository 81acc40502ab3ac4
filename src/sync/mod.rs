//! Turn synchronization between the local session and the shared file:
//! the phase state machine and the cooperative mailbox poller.

mod coordinator;
mod poller;

pub use coordinator::{Handoff, TurnCoordinator, TurnPhase};
pub use poller::{PollOutcome, SyncPoller};
