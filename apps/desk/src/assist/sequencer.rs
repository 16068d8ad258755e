//! # Request Sequencer
//!
//! Monotonic tokens that tell a late assist response it is stale.
//!
//! ```text
//!  issue() → #1 ──── parse("...") in flight ──────────────┐
//!  user edits customer name → invalidate() → latest = #2  │
//!                                                         ▼
//!                                     is_current(#1)? no → discard
//! ```

use std::sync::atomic::{AtomicU64, Ordering};

/// Identifies one assist request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct RequestToken(u64);

impl RequestToken {
    pub fn value(self) -> u64 {
        self.0
    }
}

/// Issues request tokens; only the most recent one is current.
#[derive(Debug, Default)]
pub struct RequestSequencer {
    latest: AtomicU64,
}

impl RequestSequencer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Issues a new token, making every earlier token stale.
    pub fn issue(&self) -> RequestToken {
        RequestToken(self.latest.fetch_add(1, Ordering::SeqCst) + 1)
    }

    /// Marks every issued token stale without starting a request.
    pub fn invalidate(&self) {
        self.latest.fetch_add(1, Ordering::SeqCst);
    }

    pub fn is_current(&self, token: RequestToken) -> bool {
        self.latest.load(Ordering::SeqCst) == token.0
    }
}
