//! Engine seams for a client with no screen and no DOM.
//!
//! Strokes are counted and traced instead of painted, listeners are
//! bookkeeping only (the script drives input directly), and frames fire on
//! the session's interval timer.

#[cfg(test)]
#[path = "headless_test.rs"]
mod headless_test;

use std::cell::Cell;
use std::rc::Rc;

use place::geometry::{Coordinate, Size};
use place::host::PlaceHost;
use place::message::Message;
use place::platform::{EventTarget, FrameRequest, FrameScheduler, ListenerId, ListenerKind};
use place::presence::User;
use place::render::Surface;

// =============================================================
// Surface
// =============================================================

/// A surface that records how much would have been drawn.
#[derive(Debug, Clone)]
pub struct TraceSurface {
    size: Size,
    strokes: Rc<Cell<usize>>,
    clears: Rc<Cell<usize>>,
}

impl TraceSurface {
    #[must_use]
    pub fn new(size: Size) -> Self {
        Self { size, strokes: Rc::default(), clears: Rc::default() }
    }

    #[must_use]
    pub fn strokes(&self) -> usize {
        self.strokes.get()
    }

    #[must_use]
    pub fn clears(&self) -> usize {
        self.clears.get()
    }
}

impl Surface for TraceSurface {
    fn size(&self) -> Size {
        self.size
    }

    fn clear(&mut self) {
        self.clears.set(self.clears.get() + 1);
    }

    fn stroke_line(&mut self, from: Coordinate, to: Coordinate, color: &str) {
        self.strokes.set(self.strokes.get() + 1);
        tracing::trace!(from_x = from.x, from_y = from.y, to_x = to.x, to_y = to.y, color, "stroke");
    }
}

// =============================================================
// Host
// =============================================================

/// Render a chat entry as one console line.
#[must_use]
pub fn format_message(message: &Message) -> String {
    match message {
        Message::User { name, body, from_self: true, .. } => format!("{name} (you): {body}"),
        Message::User { name, body, .. } => format!("{name}: {body}"),
        Message::Join { name } => format!("* {name} joined"),
        Message::Leave { name } => format!("* {name} left"),
    }
}

/// A host that prints chat to stdout and logs everything else.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleHost;

impl PlaceHost for ConsoleHost {
    fn set_name(&mut self, name: &str) {
        tracing::info!(name, "name assigned");
    }

    fn set_messages(&mut self, messages: Vec<Message>) {
        tracing::info!(count = messages.len(), "chat history");
        for message in &messages {
            println!("{}", format_message(message));
        }
    }

    fn add_message(&mut self, message: Message) {
        println!("{}", format_message(&message));
    }

    fn set_user(&mut self, user: &User) {
        tracing::trace!(name = %user.name, x = user.cursor.x, y = user.cursor.y, "local user");
    }

    fn set_users(&mut self, users: &[User]) {
        tracing::info!(count = users.len(), "users online");
    }

    fn set_location(&mut self, location: Coordinate) {
        tracing::debug!(x = location.x, y = location.y, "location");
    }

    fn set_is_loading(&mut self, loading: bool) {
        tracing::debug!(loading, "loading");
    }
}

// =============================================================
// Platform
// =============================================================

/// Listener bookkeeping with no event source behind it.
#[derive(Debug, Clone, Default)]
pub struct DetachedEvents {
    next: u64,
    active: Rc<Cell<usize>>,
}

impl DetachedEvents {
    #[must_use]
    pub fn active(&self) -> usize {
        self.active.get()
    }
}

impl EventTarget for DetachedEvents {
    fn listen(&mut self, kind: ListenerKind) -> ListenerId {
        self.next += 1;
        self.active.set(self.active.get() + 1);
        tracing::trace!(?kind, id = self.next, "listen");
        ListenerId(self.next)
    }

    fn unlisten(&mut self, id: ListenerId) {
        self.active.set(self.active.get().saturating_sub(1));
        tracing::trace!(id = id.0, "unlisten");
    }
}

/// Frame requests fired by the session's interval timer.
#[derive(Debug, Clone, Default)]
pub struct TickFrames {
    next: Rc<Cell<u64>>,
    pending: Rc<Cell<Option<FrameRequest>>>,
}

impl TickFrames {
    /// Consume the pending request, if there is one.
    pub fn take(&self) -> Option<FrameRequest> {
        self.pending.take()
    }
}

impl FrameScheduler for TickFrames {
    fn request_frame(&mut self) -> FrameRequest {
        let id = self.next.get() + 1;
        self.next.set(id);
        let request = FrameRequest(id);
        self.pending.set(Some(request));
        request
    }

    fn cancel_frame(&mut self, request: FrameRequest) {
        if self.pending.get() == Some(request) {
            self.pending.set(None);
        }
    }
}
