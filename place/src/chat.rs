//! Chat synchronizer: orders the local join line against chat history.
//!
//! DESIGN
//! ======
//! History arrives exactly once, in a `messages` event, and the assigned
//! name may arrive before it. The join line built from the name must land
//! in the host's log strictly after the whole history, so while history is
//! still outstanding the join is parked in a single slot and flushed right
//! after `set_messages`.
//!
//! Incremental `message` events are delivered in arrival order. When echo
//! deduplication is on, a `user` line matching one we sent optimistically is
//! swallowed instead of being shown twice.

#[cfg(test)]
#[path = "chat_test.rs"]
mod chat_test;

use crate::echo::EchoFilter;
use crate::host::PlaceHost;
use crate::message::{Message, MessageIdentity};

/// Whether the one-time history has been delivered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HistoryState {
    #[default]
    AwaitingHistory,
    HistoryLoaded,
}

/// Chat ordering state owned by the coordinator.
#[derive(Debug)]
pub struct ChatSync {
    state: HistoryState,
    pending_join: Option<Message>,
    echo: EchoFilter<MessageIdentity>,
}

impl ChatSync {
    #[must_use]
    pub fn new(echo: EchoFilter<MessageIdentity>) -> Self {
        Self { state: HistoryState::AwaitingHistory, pending_join: None, echo }
    }

    #[must_use]
    pub fn state(&self) -> HistoryState {
        self.state
    }

    #[must_use]
    pub fn pending_join(&self) -> Option<&Message> {
        self.pending_join.as_ref()
    }

    /// The authority assigned or confirmed our name.
    pub fn on_name(&mut self, name: &str, host: &mut dyn PlaceHost) {
        let join = Message::join(name);
        match self.state {
            HistoryState::HistoryLoaded => host.add_message(join),
            HistoryState::AwaitingHistory => {
                if self.pending_join.is_some() {
                    tracing::debug!(name, "replacing pending join before history");
                }
                self.pending_join = Some(join);
            }
        }
    }

    /// The one-time history arrived. Delivers it, then any parked join.
    pub fn on_history(&mut self, messages: Vec<Message>, host: &mut dyn PlaceHost) {
        if self.state == HistoryState::HistoryLoaded {
            tracing::warn!(count = messages.len(), "chat history received again");
        }
        self.state = HistoryState::HistoryLoaded;
        tracing::debug!(count = messages.len(), "chat history loaded");
        host.set_messages(messages);
        if let Some(join) = self.pending_join.take() {
            host.add_message(join);
        }
    }

    /// One incremental entry. Returns whether it reached the host.
    pub fn on_message(&mut self, message: Message, host: &mut dyn PlaceHost) -> bool {
        if let Some(identity) = message.identity()
            && self.echo.take_echo(&identity)
        {
            tracing::trace!(name = message.name(), "dropping echo of own message");
            return false;
        }
        host.add_message(message);
        true
    }

    /// Build the optimistic echo for a line we are about to send.
    pub fn send(&mut self, name: &str, color: &str, body: &str) -> Message {
        let message = Message::from_self(name, color, body);
        if let Some(identity) = message.identity() {
            self.echo.record(identity);
        }
        message
    }
}
