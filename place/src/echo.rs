//! Deduplication of our own events echoed back by the authority.
//!
//! A client applies its own chat lines and strokes optimistically. Whether the
//! authority later relays those same events back to their sender is not known
//! from the client side, so matching is opt-in: a disabled filter passes every
//! event through, and an enabled one swallows the first inbound event equal to
//! something we sent.

#[cfg(test)]
#[path = "echo_test.rs"]
mod echo_test;

use std::collections::VecDeque;

/// Bounded memory of own events awaiting a possible echo.
#[derive(Debug)]
pub struct EchoFilter<T> {
    enabled: bool,
    capacity: usize,
    pending: VecDeque<T>,
}

impl<T: PartialEq> EchoFilter<T> {
    #[must_use]
    pub fn new(enabled: bool, capacity: usize) -> Self {
        Self { enabled, capacity, pending: VecDeque::new() }
    }

    /// A filter that never matches.
    #[must_use]
    pub fn disabled() -> Self {
        Self::new(false, 0)
    }

    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Remember an event we just sent. The oldest entry is forgotten once
    /// `capacity` is exceeded.
    pub fn record(&mut self, item: T) {
        if !self.enabled || self.capacity == 0 {
            return;
        }
        if self.pending.len() == self.capacity {
            self.pending.pop_front();
        }
        self.pending.push_back(item);
    }

    /// If `incoming` is the echo of a remembered event, forget it and return `true`.
    pub fn take_echo(&mut self, incoming: &T) -> bool {
        if !self.enabled {
            return false;
        }
        let Some(position) = self.pending.iter().position(|item| item == incoming) else {
            return false;
        };
        self.pending.remove(position);
        true
    }

    #[must_use]
    pub fn pending(&self) -> usize {
        self.pending.len()
    }
}
