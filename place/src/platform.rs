//! Platform seams: input listener registration and per-frame callbacks.
//!
//! DESIGN
//! ======
//! The coordinator subscribes its pointer, keyboard, and resize listeners
//! when it starts and unsubscribes every one of them when it stops. The host
//! decodes each registered event into an [`InputEvent`] for `Place::dispatch`.
//!
//! Movement runs on a self-rescheduling frame callback. The coordinator asks
//! for one frame at a time; the host calls `Place::on_frame` when it fires.
//! `stop` cancels the outstanding request and the coordinator never asks for
//! another one after that.
//!
//! Platform callbacks outlive any single borrow of the coordinator, so they
//! reach it through a [`PlaceSlot`]: a weak handle bound once the `Place`
//! exists. A callback that fires before binding, after the `Place` is gone,
//! or while the `Place` is already borrowed is dropped.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use crate::geometry::Coordinate;
use crate::input::InputFocus;
use crate::place::Place;

/// An input event kind the coordinator listens to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ListenerKind {
    /// Pointer pressed on the canvas.
    PointerDown,
    /// Pointer moved over the canvas.
    PointerMove,
    /// Pointer released on the canvas.
    PointerUp,
    /// Key pressed anywhere in the document.
    KeyDown,
    /// Key released anywhere in the document.
    KeyUp,
    /// The canvas changed size.
    Resize,
}

impl ListenerKind {
    /// Every kind, in registration order.
    pub const ALL: [Self; 6] = [
        Self::PointerDown,
        Self::PointerMove,
        Self::PointerUp,
        Self::KeyDown,
        Self::KeyUp,
        Self::Resize,
    ];

    /// The DOM event name this kind listens for.
    #[must_use]
    pub fn event_name(self) -> &'static str {
        match self {
            Self::PointerDown => "pointerdown",
            Self::PointerMove => "pointermove",
            Self::PointerUp => "pointerup",
            Self::KeyDown => "keydown",
            Self::KeyUp => "keyup",
            Self::Resize => "resize",
        }
    }

    /// Keyboard and resize events are taken from the whole window; pointer
    /// events only from the canvas.
    #[must_use]
    pub fn targets_window(self) -> bool {
        matches!(self, Self::KeyDown | Self::KeyUp | Self::Resize)
    }
}

/// A decoded input event, ready for `Place::dispatch`.
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// Canvas-local pointer offset.
    PointerDown(Coordinate),
    PointerMove(Coordinate),
    PointerUp(Coordinate),
    KeyDown { key: String, focus: InputFocus },
    KeyUp { key: String, focus: InputFocus },
    Resize,
}

impl InputEvent {
    #[must_use]
    pub fn kind(&self) -> ListenerKind {
        match self {
            Self::PointerDown(_) => ListenerKind::PointerDown,
            Self::PointerMove(_) => ListenerKind::PointerMove,
            Self::PointerUp(_) => ListenerKind::PointerUp,
            Self::KeyDown { .. } => ListenerKind::KeyDown,
            Self::KeyUp { .. } => ListenerKind::KeyUp,
            Self::Resize => ListenerKind::Resize,
        }
    }
}

/// Handle to one registered listener.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(pub u64);

/// Something input listeners can be attached to.
pub trait EventTarget {
    fn listen(&mut self, kind: ListenerKind) -> ListenerId;
    fn unlisten(&mut self, id: ListenerId);
}

/// Handle to one pending frame callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameRequest(pub u64);

/// A display-refresh clock.
pub trait FrameScheduler {
    /// Ask for `Place::on_frame` to be called once, on the next frame.
    fn request_frame(&mut self) -> FrameRequest;

    /// Withdraw a request that has not fired yet.
    fn cancel_frame(&mut self, request: FrameRequest);
}

/// Weak, late-bound route from platform callbacks to the coordinator.
#[derive(Debug, Clone, Default)]
pub struct PlaceSlot(Rc<RefCell<Weak<RefCell<Place>>>>);

impl PlaceSlot {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Route every clone of this slot to `place`.
    pub fn bind(&self, place: &Rc<RefCell<Place>>) {
        *self.0.borrow_mut() = Rc::downgrade(place);
    }

    /// Run `f` against the bound `Place`. Returns whether it ran.
    pub fn with(&self, f: impl FnOnce(&mut Place)) -> bool {
        let Some(place) = self.0.borrow().upgrade() else {
            return false;
        };
        let Ok(mut guard) = place.try_borrow_mut() else {
            tracing::trace!("place busy; callback dropped");
            return false;
        };
        f(&mut guard);
        true
    }
}

#[cfg(test)]
#[path = "platform_test.rs"]
mod platform_test;
