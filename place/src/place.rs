//! Place coordinator: owns every seam and wires the engine together.
//!
//! DESIGN
//! ======
//! `Place` is the only writer of engine state. Inbound protocol events go to
//! the chunk store, presence, or chat synchronizer; local input drives the
//! viewport and stroke capture; every local change is pushed to the host and
//! transmitted to the authority.
//!
//! LIFECYCLE
//! =========
//! Constructing a `Place` opens the transport, subscribes the input
//! listeners, sends the initial bounds (which is what starts the chunk
//! stream), and requests the first movement frame. `stop` undoes all of that
//! exactly once. After `stop` every action is a no-op and no frame is ever
//! requested again. Dropping a `Place` stops it.

#[cfg(test)]
#[path = "place_test.rs"]
mod place_test;

use frames::Frame;

use crate::chat::{ChatSync, HistoryState};
use crate::chunk::{Chunk, ChunkStore, Line};
use crate::config::PlaceConfig;
use crate::echo::EchoFilter;
use crate::geometry::{Bounds, ChunkId, Coordinate};
use crate::host::PlaceHost;
use crate::input::{InputFocus, MoveKey};
use crate::message::Message;
use crate::platform::{EventTarget, FrameRequest, FrameScheduler, InputEvent, ListenerId, ListenerKind};
use crate::presence::{Presence, User};
use crate::protocol::{Inbound, Outbound, ProtocolError};
use crate::render::{self, Surface};
use crate::transport::Transport;
use crate::viewport::{Movement, Viewport};

/// The collaborators a [`Place`] drives.
pub struct PlaceParts {
    pub surface: Box<dyn Surface>,
    pub transport: Box<dyn Transport>,
    pub events: Box<dyn EventTarget>,
    pub frames: Box<dyn FrameScheduler>,
    pub host: Box<dyn PlaceHost>,
}

/// Client-side state of one shared drawing place.
#[allow(clippy::struct_excessive_bools)]
pub struct Place {
    config: PlaceConfig,
    surface: Box<dyn Surface>,
    transport: Box<dyn Transport>,
    events: Box<dyn EventTarget>,
    frames: Box<dyn FrameScheduler>,
    host: Box<dyn PlaceHost>,
    viewport: Viewport,
    movement: Movement,
    presence: Presence,
    chunks: ChunkStore,
    chat: ChatSync,
    line_echo: EchoFilter<(ChunkId, Line)>,
    listeners: Vec<ListenerId>,
    frame: Option<FrameRequest>,
    is_drawing: bool,
    is_loading: bool,
    initial_location_applied: bool,
    stopped: bool,
}

impl Place {
    /// Start a place at the world origin.
    #[must_use]
    pub fn new(config: PlaceConfig, parts: PlaceParts) -> Self {
        let PlaceParts { surface, mut transport, mut events, mut frames, mut host } = parts;

        transport.open();
        let listeners = ListenerKind::ALL.iter().map(|kind| events.listen(*kind)).collect();
        let viewport = Viewport::new(surface.size());
        transport.emit(&Outbound::Bounds(viewport.bounds()));
        host.set_is_loading(true);
        let frame = Some(frames.request_frame());

        tracing::debug!(
            width = viewport.size().width,
            height = viewport.size().height,
            "place started"
        );

        Self {
            movement: Movement::new(config.speed),
            chat: ChatSync::new(EchoFilter::new(config.dedupe_message_echo, config.echo_capacity)),
            line_echo: EchoFilter::new(config.dedupe_line_echo, config.echo_capacity),
            config,
            surface,
            transport,
            events,
            frames,
            host,
            viewport,
            presence: Presence::new(),
            chunks: ChunkStore::new(),
            listeners,
            frame,
            is_drawing: false,
            is_loading: true,
            initial_location_applied: false,
            stopped: false,
        }
    }

    // --- Local user ---

    /// Rename the local user and tell the authority.
    pub fn change_name(&mut self, name: &str) {
        if self.stopped {
            return;
        }
        self.presence.set_name(name);
        self.host.set_user(self.presence.local());
        self.transport.emit(&Outbound::Name(name.to_owned()));
    }

    /// Recolor the local user's strokes and tell the authority.
    pub fn change_color(&mut self, color: &str) {
        if self.stopped {
            return;
        }
        self.presence.set_color(color);
        self.host.set_user(self.presence.local());
        self.transport.emit(&Outbound::Color(color.to_owned()));
    }

    /// Send a chat line. Returns the optimistic local echo right away, or
    /// `None` once the place has stopped.
    pub fn send_message(&mut self, body: &str) -> Option<Message> {
        if self.stopped {
            return None;
        }
        self.transport.emit(&Outbound::Message(body.to_owned()));
        let local = self.presence.local();
        Some(self.chat.send(&local.name, &local.color, body))
    }

    // --- Viewport ---

    /// Jump the viewport to `location`. A NaN component or the current
    /// location is a no-op.
    pub fn change_location(&mut self, location: Coordinate) {
        if self.stopped {
            return;
        }
        self.jump(location);
    }

    /// Apply a starting location supplied by the host. Only the first call
    /// that actually moves the viewport has any effect.
    pub fn set_initial_location(&mut self, location: Coordinate) {
        if self.stopped || self.initial_location_applied {
            return;
        }
        if self.jump(location) {
            self.initial_location_applied = true;
            tracing::debug!(x = location.x, y = location.y, "initial location");
        }
    }

    /// Re-read the surface size, recompute bounds, redraw, and tell the authority.
    pub fn change_bounds(&mut self) {
        if self.stopped {
            return;
        }
        self.viewport.resize(self.surface.size());
        self.redraw();
        self.transport.emit(&Outbound::Bounds(self.viewport.bounds()));
    }

    /// Redraw every visible chunk from scratch.
    pub fn redraw(&mut self) {
        if self.stopped {
            return;
        }
        let strokes = render::redraw_all(
            self.surface.as_mut(),
            &self.chunks,
            &self.viewport.bounds(),
            self.viewport.location(),
            self.config.chunk_dimension,
        );
        tracing::trace!(strokes, "redraw");
    }

    /// Returns whether the viewport moved.
    fn jump(&mut self, location: Coordinate) -> bool {
        let Some(delta) = self.viewport.jump_to(location) else {
            return false;
        };
        self.presence.shift_cursor(delta);
        self.redraw();
        self.is_loading = true;
        self.host.set_is_loading(true);
        self.publish_viewport();
        true
    }

    /// Push the moved viewport and cursor out to the host and the authority.
    fn publish_viewport(&mut self) {
        let location = self.viewport.location();
        self.host.set_location(location);
        self.host.set_user(self.presence.local());
        self.transport.emit(&Outbound::Bounds(self.viewport.bounds()));
        self.transport.emit(&Outbound::Cursor(self.presence.local().cursor));
    }

    // --- Input ---

    /// Route one decoded listener event to its handler.
    pub fn dispatch(&mut self, event: InputEvent) {
        match event {
            InputEvent::PointerDown(offset) => self.on_pointer_down(offset),
            InputEvent::PointerMove(offset) => self.on_pointer_move(offset),
            InputEvent::PointerUp(offset) => self.on_pointer_up(offset),
            InputEvent::KeyDown { key, focus } => self.on_key_down(&key, focus),
            InputEvent::KeyUp { key, focus } => self.on_key_up(&key, focus),
            InputEvent::Resize => self.change_bounds(),
        }
    }

    pub fn on_pointer_down(&mut self, offset: Coordinate) {
        if self.stopped {
            return;
        }
        self.presence.set_cursor(self.to_world(offset));
        self.is_drawing = true;
        self.publish_cursor();
    }

    pub fn on_pointer_move(&mut self, offset: Coordinate) {
        if self.stopped {
            return;
        }
        let cursor = self.to_world(offset);
        if self.is_drawing {
            let local = self.presence.local();
            let line = Line::new(local.cursor, cursor, local.color.clone());
            self.draw_local_line(line);
        }
        self.presence.set_cursor(cursor);
        self.publish_cursor();
    }

    pub fn on_pointer_up(&mut self, offset: Coordinate) {
        if self.stopped {
            return;
        }
        self.presence.set_cursor(self.to_world(offset));
        self.is_drawing = false;
        self.publish_cursor();
    }

    /// A key went down. Ignored while a text field has focus.
    pub fn on_key_down(&mut self, key: &str, focus: InputFocus) {
        if self.stopped || focus == InputFocus::TextField {
            return;
        }
        if let Some(key) = MoveKey::from_key(key) {
            self.movement.press(key);
        }
    }

    /// A key came up. Ignored while a text field has focus.
    pub fn on_key_up(&mut self, key: &str, focus: InputFocus) {
        if self.stopped || focus == InputFocus::TextField {
            return;
        }
        if let Some(key) = MoveKey::from_key(key) {
            self.movement.release(key);
        }
    }

    /// The frame requested earlier fired. Applies held-key movement and asks
    /// for the next frame.
    pub fn on_frame(&mut self) {
        self.frame = None;
        if self.stopped {
            return;
        }
        if self.movement.is_moving() {
            let delta = self.movement.velocity();
            self.viewport.translate(delta);
            self.presence.shift_cursor(delta);
            self.redraw();
            self.publish_viewport();
            tracing::trace!(x = delta.x, y = delta.y, "moved");
        }
        self.frame = Some(self.frames.request_frame());
    }

    fn to_world(&self, offset: Coordinate) -> Coordinate {
        self.viewport.location() + offset
    }

    fn publish_cursor(&mut self) {
        self.host.set_user(self.presence.local());
        self.transport.emit(&Outbound::Cursor(self.presence.local().cursor));
    }

    fn draw_local_line(&mut self, line: Line) {
        render::draw_line(
            self.surface.as_mut(),
            &line,
            &self.viewport.bounds(),
            self.viewport.location(),
        );
        let chunk_id = line.chunk_id(self.config.chunk_dimension);
        if !self.chunks.append_line(&chunk_id, line.clone()) {
            tracing::trace!(chunk = %chunk_id, "drew line into a chunk not yet received");
        }
        self.line_echo.record((chunk_id, line.clone()));
        self.transport.emit(&Outbound::Line(line));
    }

    // --- Inbound ---

    /// Decode and apply one frame from the authority.
    ///
    /// # Errors
    ///
    /// Returns [`ProtocolError`] when the frame is not a known event with a
    /// well-formed payload. Engine state is left untouched in that case.
    pub fn receive_frame(&mut self, frame: &Frame) -> Result<(), ProtocolError> {
        let event = Inbound::from_frame(frame)?;
        self.receive(event);
        Ok(())
    }

    /// Apply one event from the authority.
    pub fn receive(&mut self, event: Inbound) {
        if self.stopped {
            return;
        }
        match event {
            Inbound::Name(name) => self.receive_name(&name),
            Inbound::Users(users) => {
                self.presence.replace_remote(users);
                self.host.set_users(self.presence.remote());
            }
            Inbound::Chunk(chunk) => self.receive_chunk(chunk),
            Inbound::Line { chunk_id, line } => self.receive_line(chunk_id, line),
            Inbound::Messages(messages) => self.chat.on_history(messages, self.host.as_mut()),
            Inbound::Message(message) => {
                self.chat.on_message(message, self.host.as_mut());
            }
        }
    }

    fn receive_name(&mut self, name: &str) {
        self.presence.set_name(name);
        self.host.set_name(name);
        self.host.set_user(self.presence.local());
        self.chat.on_name(name, self.host.as_mut());
    }

    fn receive_chunk(&mut self, chunk: Chunk) {
        if self.is_loading {
            self.is_loading = false;
            self.host.set_is_loading(false);
        }
        let bounds = self.viewport.bounds();
        let location = self.viewport.location();
        let stored = self.chunks.insert(chunk);
        if stored.is_in_bounds(&bounds, self.config.chunk_dimension) {
            let strokes = render::draw_chunk(self.surface.as_mut(), stored, &bounds, location);
            tracing::trace!(chunk = %stored.id, strokes, "chunk received");
        } else {
            tracing::trace!(chunk = %stored.id, "chunk received off screen");
        }
    }

    fn receive_line(&mut self, chunk_id: ChunkId, line: Line) {
        let echo = (chunk_id, line);
        if self.line_echo.take_echo(&echo) {
            tracing::trace!(chunk = %echo.0, "dropping echo of own line");
            return;
        }
        let (chunk_id, line) = echo;
        let bounds = self.viewport.bounds();
        let location = self.viewport.location();
        if !self.chunks.append_line(&chunk_id, line.clone()) {
            tracing::trace!(chunk = %chunk_id, "line for unknown chunk");
            return;
        }
        render::draw_line(self.surface.as_mut(), &line, &bounds, location);
    }

    // --- Queries ---

    /// Whether `candidate` is already the local user's name.
    #[must_use]
    pub fn is_name(&self, candidate: &str) -> bool {
        self.presence.is_name(candidate)
    }

    /// Whether jumping to `candidate` would be a no-op.
    #[must_use]
    pub fn is_location(&self, candidate: Coordinate) -> bool {
        self.viewport.is_location(candidate)
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.presence.local().name
    }

    #[must_use]
    pub fn color(&self) -> &str {
        &self.presence.local().color
    }

    #[must_use]
    pub fn location(&self) -> Coordinate {
        self.viewport.location()
    }

    #[must_use]
    pub fn bounds(&self) -> Bounds {
        self.viewport.bounds()
    }

    #[must_use]
    pub fn user(&self) -> &User {
        self.presence.local()
    }

    #[must_use]
    pub fn users(&self) -> &[User] {
        self.presence.remote()
    }

    #[must_use]
    pub fn chunks(&self) -> &ChunkStore {
        &self.chunks
    }

    #[must_use]
    pub fn velocity(&self) -> Coordinate {
        self.movement.velocity()
    }

    #[must_use]
    pub fn is_drawing(&self) -> bool {
        self.is_drawing
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    #[must_use]
    pub fn history_state(&self) -> HistoryState {
        self.chat.state()
    }

    #[must_use]
    pub fn is_stopped(&self) -> bool {
        self.stopped
    }

    #[must_use]
    pub fn config(&self) -> &PlaceConfig {
        &self.config
    }

    // --- Lifecycle ---

    /// Tear down: close the transport, drop every listener, and cancel the
    /// pending frame. Calling it again does nothing.
    pub fn stop(&mut self) {
        if self.stopped {
            return;
        }
        self.stopped = true;
        self.transport.close();
        for id in self.listeners.drain(..) {
            self.events.unlisten(id);
        }
        if let Some(request) = self.frame.take() {
            self.frames.cancel_frame(request);
        }
        self.movement.clear();
        self.is_drawing = false;
        tracing::debug!("place stopped");
    }
}

impl Drop for Place {
    fn drop(&mut self) {
        self.stop();
    }
}
