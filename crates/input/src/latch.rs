//! Action latch between input polling and the game tick.
//!
//! Key events arrive whenever the terminal delivers them, but the engine takes
//! at most one action per tick. The latch keeps the most recent action until
//! the next tick consumes it; older presses in between are overwritten.

use crate::types::Action;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ActionLatch {
    pending: Option<Action>,
}

impl ActionLatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an action, replacing any not yet consumed
    pub fn press(&mut self, action: Action) {
        self.pending = Some(action);
    }

    /// Consume the pending action
    pub fn take(&mut self) -> Option<Action> {
        self.pending.take()
    }

    pub fn peek(&self) -> Option<Action> {
        self.pending
    }

    pub fn clear(&mut self) {
        self.pending = None;
    }
}
