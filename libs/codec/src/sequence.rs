//! # Sequence Gap Detection
//!
//! Tracks the feed-reported message counter of one entity and classifies
//! each new counter as in order, a duplicate, or following a gap. The feed
//! may conflate several logical updates into one message and report how
//! many; the expected next counter is `last + conflation`.
//!
//! ```text
//! last = 100, conflation = 1
//!   counter 101  -> InOrder
//!   counter 100  -> Duplicate (state untouched)
//!   counter 105  -> Gap { begin: 101, end: 104 }, last = 105
//! ```
//!
//! The detector never requests retransmission; it only reports the hole.

use serde::{Deserialize, Serialize};
use tracing::warn;

/// Outcome of one counter observation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SequenceCheck {
    /// No prior counter, or the counter is not positive; recorded unchecked
    Accepted,
    /// Counter within the expected window
    InOrder,
    /// Counter equals the last accepted one; notification is suppressed
    Duplicate,
    /// Counters `begin..=end` were never delivered
    Gap { begin: u64, end: u64 },
}

impl SequenceCheck {
    pub fn is_duplicate(self) -> bool {
        self == Self::Duplicate
    }

    /// Gap boundaries, when this observation found one
    pub fn gap(self) -> Option<(u64, u64)> {
        match self {
            Self::Gap { begin, end } => Some((begin, end)),
            _ => None,
        }
    }
}

/// Per-entity counter state
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SequenceGapDetector {
    /// Zero when no prior counter is known
    last_accepted: u64,
    last_conflation: u64,
}

impl SequenceGapDetector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn last_accepted(&self) -> u64 {
        self.last_accepted
    }

    pub fn last_conflation(&self) -> u64 {
        self.last_conflation
    }

    /// Classify a delta message's counter
    ///
    /// `conflation` is the count the message reported, if any; otherwise
    /// `default_conflation` applies.
    pub fn observe(
        &mut self,
        counter: i64,
        conflation: Option<u64>,
        default_conflation: u64,
    ) -> SequenceCheck {
        let conflation = conflation.unwrap_or(default_conflation);
        self.last_conflation = conflation;

        // A non-positive counter clears the baseline
        let counter = match u64::try_from(counter) {
            Ok(c) if c > 0 => c,
            _ => {
                self.last_accepted = 0;
                return SequenceCheck::Accepted;
            }
        };

        if self.last_accepted == 0 {
            self.last_accepted = counter;
            return SequenceCheck::Accepted;
        }

        if counter == self.last_accepted {
            return SequenceCheck::Duplicate;
        }

        let expected = self.last_accepted.saturating_add(conflation);
        let check = if counter > expected {
            let (begin, end) = (expected, counter - 1);
            warn!(
                last_accepted = self.last_accepted,
                counter,
                conflation,
                begin,
                end,
                "sequence gap detected"
            );
            SequenceCheck::Gap { begin, end }
        } else {
            SequenceCheck::InOrder
        };

        self.last_accepted = counter;
        check
    }

    /// Record a recap's counter without gap or duplicate checks
    pub fn observe_recap(&mut self, counter: i64, conflation: Option<u64>) {
        if let Some(conflation) = conflation {
            self.last_conflation = conflation;
        }
        self.last_accepted = u64::try_from(counter).unwrap_or(0);
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
