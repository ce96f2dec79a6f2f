//! Identity tokens for flow messages.
//!
//! Every dataset refresh opens a new render cycle. Messages that arrive
//! without a `hash` column get one synthesized from their row index and the
//! cycle token, so keys never collide within a cycle and differ between
//! cycles.

use std::fmt;

/// Token identifying one render cycle.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
pub struct CycleId(pub u64);

impl fmt::Debug for CycleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CycleId({})", self.0)
    }
}

impl fmt::Display for CycleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Source of render-cycle tokens for hash synthesis.
pub trait HashSource {
    /// Start a new render cycle and return its token.
    fn next_cycle(&mut self) -> CycleId;

    /// Hash for a message that did not carry one.
    fn message_hash(&self, cycle: CycleId, message_id: usize) -> String {
        format!("msg_{}_{}", message_id, cycle)
    }
}

/// Monotonic counter; the first cycle is 1.
#[derive(Debug, Clone, Default)]
pub struct CycleCounter {
    last: u64,
}

impl CycleCounter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Counter whose next cycle will be `start`.
    pub fn starting_at(start: u64) -> Self {
        Self {
            last: start.saturating_sub(1),
        }
    }

    pub fn current(&self) -> CycleId {
        CycleId(self.last)
    }
}

impl HashSource for CycleCounter {
    fn next_cycle(&mut self) -> CycleId {
        self.last = self.last.wrapping_add(1);
        CycleId(self.last)
    }
}
