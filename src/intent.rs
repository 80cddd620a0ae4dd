use log::trace;

use crate::input::{Direction, direction_change_is_valid};

/// Single-slot direction buffer between input events and simulation ticks.
///
/// At most one direction change is honored per tick. The first legal
/// submission after a tick wins; later submissions are dropped until the
/// engine calls [`IntentGate::consume`]. A submission that would reverse the
/// current velocity never takes the slot.
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq)]
pub struct IntentGate {
    pending: Option<Direction>,
}

impl IntentGate {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Offers `direction` as the next velocity. Returns `true` when accepted.
    pub fn submit(&mut self, direction: Direction, current: Direction) -> bool {
        if let Some(pending) = self.pending {
            trace!("intent {direction:?} dropped, {pending:?} already committed this tick");
            return false;
        }

        if !direction_change_is_valid(current, direction) {
            trace!("intent {direction:?} dropped, reverses {current:?}");
            return false;
        }

        self.pending = Some(direction);
        true
    }

    /// Returns the direction for this tick and reopens the slot.
    pub fn consume(&mut self, current: Direction) -> Direction {
        self.pending.take().unwrap_or(current)
    }

    /// Returns the committed-but-unconsumed direction, if any.
    #[must_use]
    pub fn pending(&self) -> Option<Direction> {
        self.pending
    }

    pub fn clear(&mut self) {
        self.pending = None;
    }
}
