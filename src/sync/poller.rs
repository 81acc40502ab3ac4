use std::time::Duration;

use crate::error::ProtocolError;
use crate::protocol::{Mailbox, Snapshot, WireExpectation};

/// Result of one poll attempt.
#[derive(Debug)]
pub enum PollOutcome {
    /// A well-formed, turn-appropriate snapshot appeared.
    Ready(Snapshot),
    /// Nothing usable yet; try again after the interval.
    NotReady,
    /// The attempt ceiling was reached without a usable snapshot.
    GaveUp,
}

/// Cooperative retry loop over the mailbox.
///
/// The poller never blocks: the caller invokes [`SyncPoller::poll`] on its
/// own tick (the UI event loop, the agent's sleep loop) at roughly
/// [`SyncPoller::interval`]. Every parse failure is treated as "the other
/// side has not finished writing" and only extends the wait, but the
/// consecutive-failure count and last error stay observable so a wedged
/// opponent (say, a crashed agent leaving a corrupt file behind) shows up
/// as a condition instead of an invisible infinite loop.
#[derive(Debug)]
pub struct SyncPoller {
    interval: Duration,
    max_attempts: u64,
    attempts: u64,
    last_error: Option<ProtocolError>,
}

impl SyncPoller {
    /// `max_attempts` of 0 polls forever, matching the original protocol.
    pub fn new(interval: Duration, max_attempts: u64) -> SyncPoller {
        SyncPoller {
            interval,
            max_attempts,
            attempts: 0,
            last_error: None,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Consecutive failed attempts since the last success or reset.
    pub fn attempts(&self) -> u64 {
        self.attempts
    }

    pub fn last_error(&self) -> Option<&ProtocolError> {
        self.last_error.as_ref()
    }

    /// Clear failure accounting, e.g. when a new wait begins.
    pub fn reset(&mut self) {
        self.attempts = 0;
        self.last_error = None;
    }

    /// Attempt one mailbox read.
    pub fn poll(
        &mut self,
        mailbox: &Mailbox,
        rows: usize,
        cols: usize,
        expect: WireExpectation,
    ) -> PollOutcome {
        match mailbox.read(rows, cols, expect) {
            Ok(snapshot) => {
                self.reset();
                PollOutcome::Ready(snapshot)
            }
            Err(err) => {
                self.attempts += 1;
                tracing::debug!(attempts = self.attempts, error = %err, "mailbox not ready");
                let gave_up = self.max_attempts > 0 && self.attempts >= self.max_attempts;
                if gave_up {
                    tracing::warn!(
                        attempts = self.attempts,
                        error = %err,
                        "giving up on mailbox after attempt ceiling"
                    );
                }
                self.last_error = Some(err);
                if gave_up {
                    PollOutcome::GaveUp
                } else {
                    PollOutcome::NotReady
                }
            }
        }
    }
}
