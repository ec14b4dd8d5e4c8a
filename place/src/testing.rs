//! Recording fakes for the engine's seams.
//!
//! Each fake is a cheap `Clone` over shared state: a test keeps one handle
//! and boxes another into the [`Place`] under test, then inspects what the
//! engine did through the handle it kept.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use crate::config::PlaceConfig;
use crate::geometry::{Coordinate, Size};
use crate::host::PlaceHost;
use crate::message::Message;
use crate::place::{Place, PlaceParts};
use crate::platform::{EventTarget, FrameRequest, FrameScheduler, ListenerId, ListenerKind};
use crate::presence::User;
use crate::protocol::Outbound;
use crate::render::Surface;
use crate::transport::Transport;

// =============================================================
// Surface
// =============================================================

#[derive(Debug, Clone, PartialEq)]
pub enum SurfaceCall {
    Clear,
    Stroke { from: Coordinate, to: Coordinate, color: String },
}

#[derive(Debug, Clone)]
pub struct RecordingSurface {
    size: Rc<Cell<Size>>,
    calls: Rc<RefCell<Vec<SurfaceCall>>>,
}

impl RecordingSurface {
    pub fn new(size: Size) -> Self {
        Self { size: Rc::new(Cell::new(size)), calls: Rc::default() }
    }

    pub fn set_size(&self, size: Size) {
        self.size.set(size);
    }

    pub fn calls(&self) -> Vec<SurfaceCall> {
        self.calls.borrow().clone()
    }

    /// Strokes recorded since the last clear of the log.
    pub fn strokes(&self) -> Vec<SurfaceCall> {
        self.calls
            .borrow()
            .iter()
            .filter(|call| matches!(call, SurfaceCall::Stroke { .. }))
            .cloned()
            .collect()
    }

    pub fn clears(&self) -> usize {
        self.calls.borrow().iter().filter(|call| **call == SurfaceCall::Clear).count()
    }

    pub fn reset(&self) {
        self.calls.borrow_mut().clear();
    }
}

impl Surface for RecordingSurface {
    fn size(&self) -> Size {
        self.size.get()
    }

    fn clear(&mut self) {
        self.calls.borrow_mut().push(SurfaceCall::Clear);
    }

    fn stroke_line(&mut self, from: Coordinate, to: Coordinate, color: &str) {
        self.calls.borrow_mut().push(SurfaceCall::Stroke { from, to, color: color.to_owned() });
    }
}

// =============================================================
// Transport
// =============================================================

#[derive(Debug, Default)]
struct TransportLog {
    opened: usize,
    closed: usize,
    sent: Vec<Outbound>,
}

#[derive(Debug, Clone, Default)]
pub struct RecordingTransport {
    log: Rc<RefCell<TransportLog>>,
}

impl RecordingTransport {
    pub fn opened(&self) -> usize {
        self.log.borrow().opened
    }

    pub fn closed(&self) -> usize {
        self.log.borrow().closed
    }

    pub fn sent(&self) -> Vec<Outbound> {
        self.log.borrow().sent.clone()
    }

    /// Event names sent so far, in order.
    pub fn events(&self) -> Vec<&'static str> {
        self.log.borrow().sent.iter().map(Outbound::event).collect()
    }

    pub fn reset(&self) {
        self.log.borrow_mut().sent.clear();
    }
}

impl Transport for RecordingTransport {
    fn open(&mut self) {
        self.log.borrow_mut().opened += 1;
    }

    fn emit(&mut self, event: &Outbound) {
        self.log.borrow_mut().sent.push(event.clone());
    }

    fn close(&mut self) {
        self.log.borrow_mut().closed += 1;
    }
}

// =============================================================
// Host
// =============================================================

#[derive(Debug, Clone, PartialEq)]
pub enum HostCall {
    SetName(String),
    SetMessages(Vec<Message>),
    AddMessage(Message),
    SetUser(User),
    SetUsers(Vec<User>),
    SetLocation(Coordinate),
    SetIsLoading(bool),
}

#[derive(Debug, Clone, Default)]
pub struct RecordingHost {
    calls: Rc<RefCell<Vec<HostCall>>>,
}

impl RecordingHost {
    pub fn calls(&self) -> Vec<HostCall> {
        self.calls.borrow().clone()
    }

    /// The chat log as a host would hold it: history replaces, entries append.
    pub fn chat_log(&self) -> Vec<Message> {
        let mut log = Vec::new();
        for call in self.calls.borrow().iter() {
            match call {
                HostCall::SetMessages(messages) => log.clone_from(messages),
                HostCall::AddMessage(message) => log.push(message.clone()),
                _ => {}
            }
        }
        log
    }

    /// Most recent loading flag pushed, if any.
    pub fn loading(&self) -> Option<bool> {
        self.calls.borrow().iter().rev().find_map(|call| match call {
            HostCall::SetIsLoading(loading) => Some(*loading),
            _ => None,
        })
    }

    pub fn reset(&self) {
        self.calls.borrow_mut().clear();
    }
}

impl PlaceHost for RecordingHost {
    fn set_name(&mut self, name: &str) {
        self.calls.borrow_mut().push(HostCall::SetName(name.to_owned()));
    }

    fn set_messages(&mut self, messages: Vec<Message>) {
        self.calls.borrow_mut().push(HostCall::SetMessages(messages));
    }

    fn add_message(&mut self, message: Message) {
        self.calls.borrow_mut().push(HostCall::AddMessage(message));
    }

    fn set_user(&mut self, user: &User) {
        self.calls.borrow_mut().push(HostCall::SetUser(user.clone()));
    }

    fn set_users(&mut self, users: &[User]) {
        self.calls.borrow_mut().push(HostCall::SetUsers(users.to_vec()));
    }

    fn set_location(&mut self, location: Coordinate) {
        self.calls.borrow_mut().push(HostCall::SetLocation(location));
    }

    fn set_is_loading(&mut self, loading: bool) {
        self.calls.borrow_mut().push(HostCall::SetIsLoading(loading));
    }
}

// =============================================================
// Platform
// =============================================================

#[derive(Debug, Default)]
struct ListenerLog {
    next: u64,
    active: Vec<(ListenerId, ListenerKind)>,
    removed: Vec<ListenerId>,
}

#[derive(Debug, Clone, Default)]
pub struct RecordingEvents {
    log: Rc<RefCell<ListenerLog>>,
}

impl RecordingEvents {
    pub fn active_kinds(&self) -> Vec<ListenerKind> {
        self.log.borrow().active.iter().map(|(_, kind)| *kind).collect()
    }

    pub fn removed(&self) -> usize {
        self.log.borrow().removed.len()
    }
}

impl EventTarget for RecordingEvents {
    fn listen(&mut self, kind: ListenerKind) -> ListenerId {
        let mut log = self.log.borrow_mut();
        log.next += 1;
        let id = ListenerId(log.next);
        log.active.push((id, kind));
        id
    }

    fn unlisten(&mut self, id: ListenerId) {
        let mut log = self.log.borrow_mut();
        log.active.retain(|(active, _)| *active != id);
        log.removed.push(id);
    }
}

#[derive(Debug, Default)]
struct FrameLog {
    next: u64,
    pending: Option<FrameRequest>,
    requested: usize,
    cancelled: Vec<FrameRequest>,
}

/// A frame clock that only fires when the test says so.
#[derive(Debug, Clone, Default)]
pub struct ManualFrames {
    log: Rc<RefCell<FrameLog>>,
}

impl ManualFrames {
    pub fn pending(&self) -> Option<FrameRequest> {
        self.log.borrow().pending
    }

    pub fn requested(&self) -> usize {
        self.log.borrow().requested
    }

    pub fn cancelled(&self) -> Vec<FrameRequest> {
        self.log.borrow().cancelled.clone()
    }

    /// Consume the pending request, as the display would when it fires.
    pub fn take(&self) -> Option<FrameRequest> {
        self.log.borrow_mut().pending.take()
    }
}

impl FrameScheduler for ManualFrames {
    fn request_frame(&mut self) -> FrameRequest {
        let mut log = self.log.borrow_mut();
        log.next += 1;
        log.requested += 1;
        let request = FrameRequest(log.next);
        log.pending = Some(request);
        request
    }

    fn cancel_frame(&mut self, request: FrameRequest) {
        let mut log = self.log.borrow_mut();
        if log.pending == Some(request) {
            log.pending = None;
        }
        log.cancelled.push(request);
    }
}

// =============================================================
// Harness
// =============================================================

/// A [`Place`] wired to recording fakes.
pub struct Harness {
    pub place: Place,
    pub surface: RecordingSurface,
    pub transport: RecordingTransport,
    pub host: RecordingHost,
    pub events: RecordingEvents,
    pub frames: ManualFrames,
}

impl Harness {
    /// 800x600 canvas, default config.
    pub fn new() -> Self {
        Self::with(PlaceConfig::default(), Size::new(800.0, 600.0))
    }

    pub fn with(config: PlaceConfig, size: Size) -> Self {
        let surface = RecordingSurface::new(size);
        let transport = RecordingTransport::default();
        let host = RecordingHost::default();
        let events = RecordingEvents::default();
        let frames = ManualFrames::default();
        let place = Place::new(
            config,
            PlaceParts {
                surface: Box::new(surface.clone()),
                transport: Box::new(transport.clone()),
                events: Box::new(events.clone()),
                frames: Box::new(frames.clone()),
                host: Box::new(host.clone()),
            },
        );
        Self { place, surface, transport, host, events, frames }
    }

    /// Fire the pending frame, if any. Returns whether one fired.
    pub fn tick(&mut self) -> bool {
        if self.frames.take().is_none() {
            return false;
        }
        self.place.on_frame();
        true
    }

    /// Forget everything recorded so far.
    pub fn reset(&self) {
        self.surface.reset();
        self.transport.reset();
        self.host.reset();
    }
}
