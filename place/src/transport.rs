//! Transport seam between the engine and the remote authority.
//!
//! Sends are fire-and-forget: no acknowledgment, retry, or backpressure at
//! this layer. Reconnecting is the transport's own business.

#[cfg(test)]
#[path = "transport_test.rs"]
mod transport_test;

use frames::Frame;
use futures::channel::mpsc;

use crate::protocol::Outbound;

/// Outgoing half of the connection to the authority.
pub trait Transport {
    /// Called once when the coordinator starts.
    fn open(&mut self) {}

    /// Send one event, best effort.
    fn emit(&mut self, event: &Outbound);

    /// Close the connection. Called once when the coordinator stops.
    fn close(&mut self);
}

/// Receiving half of a [`ChannelTransport`].
pub type FrameReceiver = mpsc::UnboundedReceiver<Frame>;

/// A [`Transport`] that forwards frames into an unbounded channel.
///
/// The receiving half is drained by whatever owns the socket.
#[derive(Debug)]
pub struct ChannelTransport {
    tx: Option<mpsc::UnboundedSender<Frame>>,
}

impl ChannelTransport {
    /// Create a transport and the receiver its frames arrive on.
    #[must_use]
    pub fn channel() -> (Self, FrameReceiver) {
        let (tx, rx) = mpsc::unbounded();
        (Self { tx: Some(tx) }, rx)
    }

    /// Whether frames can still be sent.
    #[must_use]
    pub fn is_open(&self) -> bool {
        self.tx.as_ref().is_some_and(|tx| !tx.is_closed())
    }
}

impl Transport for ChannelTransport {
    fn emit(&mut self, event: &Outbound) {
        let Some(tx) = &self.tx else {
            return;
        };
        if tx.unbounded_send(event.to_frame()).is_err() {
            tracing::trace!(event = event.event(), "transport closed; dropping frame");
        }
    }

    fn close(&mut self) {
        if let Some(tx) = self.tx.take() {
            tx.close_channel();
        }
    }
}
