//! Browser bindings: the canvas surface, DOM listeners, and the animation
//! frame clock.
//!
//! This module is the only place that touches `web_sys`. [`mount`] builds a
//! [`Place`] over a `<canvas>` element and hands back the shared handle the
//! page keeps; every callback registered here reaches the `Place` through a
//! [`PlaceSlot`], so dropping that handle stops the engine.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{
    CanvasRenderingContext2d, Event, HtmlCanvasElement, HtmlInputElement, HtmlTextAreaElement, KeyboardEvent,
    MouseEvent, Window,
};

use crate::config::PlaceConfig;
use crate::geometry::{Coordinate, Size};
use crate::host::PlaceHost;
use crate::input::InputFocus;
use crate::place::{Place, PlaceParts};
use crate::platform::{EventTarget, FrameRequest, FrameScheduler, InputEvent, ListenerId, ListenerKind, PlaceSlot};
use crate::render::Surface;
use crate::transport::Transport;

/// Build a [`Place`] drawing into `canvas` and listening to the page.
///
/// # Errors
///
/// Returns the browser's error if there is no window or the canvas has no
/// 2D context.
pub fn mount(
    canvas: HtmlCanvasElement,
    config: PlaceConfig,
    transport: Box<dyn Transport>,
    host: Box<dyn PlaceHost>,
) -> Result<Rc<RefCell<Place>>, JsValue> {
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
    fit_canvas(&canvas);
    let slot = PlaceSlot::new();
    let parts = PlaceParts {
        surface: Box::new(WebSurface::new(canvas.clone())?),
        transport,
        events: Box::new(WebEvents::new(window.clone(), canvas, slot.clone())),
        frames: Box::new(WebFrames::new(window, slot.clone())),
        host,
    };
    let place = Rc::new(RefCell::new(Place::new(config, parts)));
    slot.bind(&place);
    Ok(place)
}

// =============================================================
// Surface
// =============================================================

/// A [`Surface`] backed by a canvas element's 2D context.
pub struct WebSurface {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
}

impl WebSurface {
    /// Bind to `canvas`.
    ///
    /// # Errors
    ///
    /// Returns the browser's error if the canvas has no 2D context.
    pub fn new(canvas: HtmlCanvasElement) -> Result<Self, JsValue> {
        let ctx = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("canvas has no 2d context"))?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(JsValue::from)?;
        Ok(Self { canvas, ctx })
    }
}

impl Surface for WebSurface {
    fn size(&self) -> Size {
        Size::new(f64::from(self.canvas.width()), f64::from(self.canvas.height()))
    }

    fn clear(&mut self) {
        let size = self.size();
        self.ctx.clear_rect(0.0, 0.0, size.width, size.height);
    }

    fn stroke_line(&mut self, from: Coordinate, to: Coordinate, color: &str) {
        self.ctx.set_stroke_style_str(color);
        self.ctx.begin_path();
        self.ctx.move_to(from.x, from.y);
        self.ctx.line_to(to.x, to.y);
        self.ctx.stroke();
    }
}

/// Match the canvas backing store to the size its parent lays it out at.
fn fit_canvas(canvas: &HtmlCanvasElement) {
    let Some(parent) = canvas.parent_element() else {
        return;
    };
    let width = u32::try_from(parent.client_width()).unwrap_or(0);
    let height = u32::try_from(parent.client_height()).unwrap_or(0);
    if width > 0 && height > 0 {
        canvas.set_width(width);
        canvas.set_height(height);
    }
}

// =============================================================
// Listeners
// =============================================================

type Callback = Closure<dyn FnMut(Event)>;

struct Listener {
    kind: ListenerKind,
    callback: Callback,
}

/// DOM listeners: pointer events on the canvas, keys and resize on the window.
pub struct WebEvents {
    window: Window,
    canvas: HtmlCanvasElement,
    slot: PlaceSlot,
    next_id: u64,
    active: HashMap<ListenerId, Listener>,
    // `stop` can run from inside one of these callbacks, so removed closures
    // live until the listener set itself is dropped.
    retired: Vec<Callback>,
}

impl WebEvents {
    #[must_use]
    pub fn new(window: Window, canvas: HtmlCanvasElement, slot: PlaceSlot) -> Self {
        Self { window, canvas, slot, next_id: 0, active: HashMap::new(), retired: Vec::new() }
    }

    fn target(&self, kind: ListenerKind) -> &web_sys::EventTarget {
        if kind.targets_window() { self.window.as_ref() } else { self.canvas.as_ref() }
    }
}

impl EventTarget for WebEvents {
    fn listen(&mut self, kind: ListenerKind) -> ListenerId {
        self.next_id += 1;
        let id = ListenerId(self.next_id);
        let slot = self.slot.clone();
        let canvas = self.canvas.clone();
        let callback = Closure::wrap(Box::new(move |event: Event| {
            let Some(input) = decode(kind, &event, &canvas) else {
                return;
            };
            if !slot.with(|place| place.dispatch(input)) {
                tracing::trace!(event = kind.event_name(), "input dropped");
            }
        }) as Box<dyn FnMut(Event)>);

        if let Err(err) = self
            .target(kind)
            .add_event_listener_with_callback(kind.event_name(), callback.as_ref().unchecked_ref())
        {
            tracing::warn!(?err, event = kind.event_name(), "failed to attach listener");
        }
        self.active.insert(id, Listener { kind, callback });
        id
    }

    fn unlisten(&mut self, id: ListenerId) {
        let Some(listener) = self.active.remove(&id) else {
            return;
        };
        let name = listener.kind.event_name();
        if let Err(err) = self
            .target(listener.kind)
            .remove_event_listener_with_callback(name, listener.callback.as_ref().unchecked_ref())
        {
            tracing::warn!(?err, event = name, "failed to detach listener");
        }
        self.retired.push(listener.callback);
    }
}

fn decode(kind: ListenerKind, event: &Event, canvas: &HtmlCanvasElement) -> Option<InputEvent> {
    match kind {
        ListenerKind::PointerDown => pointer_offset(event).map(InputEvent::PointerDown),
        ListenerKind::PointerMove => pointer_offset(event).map(InputEvent::PointerMove),
        ListenerKind::PointerUp => pointer_offset(event).map(InputEvent::PointerUp),
        ListenerKind::KeyDown => key_of(event).map(|(key, focus)| InputEvent::KeyDown { key, focus }),
        ListenerKind::KeyUp => key_of(event).map(|(key, focus)| InputEvent::KeyUp { key, focus }),
        ListenerKind::Resize => {
            fit_canvas(canvas);
            Some(InputEvent::Resize)
        }
    }
}

fn pointer_offset(event: &Event) -> Option<Coordinate> {
    let mouse = event.dyn_ref::<MouseEvent>()?;
    Some(Coordinate::new(f64::from(mouse.offset_x()), f64::from(mouse.offset_y())))
}

fn key_of(event: &Event) -> Option<(String, InputFocus)> {
    let key = event.dyn_ref::<KeyboardEvent>()?.key();
    let typing = event.target().is_some_and(|target| {
        target.dyn_ref::<HtmlInputElement>().is_some() || target.dyn_ref::<HtmlTextAreaElement>().is_some()
    });
    let focus = if typing { InputFocus::TextField } else { InputFocus::Canvas };
    Some((key, focus))
}

// =============================================================
// Frames
// =============================================================

/// `requestAnimationFrame` clock. One closure serves every request.
pub struct WebFrames {
    window: Window,
    callback: Closure<dyn FnMut()>,
}

impl WebFrames {
    #[must_use]
    pub fn new(window: Window, slot: PlaceSlot) -> Self {
        let callback = Closure::wrap(Box::new(move || {
            if !slot.with(Place::on_frame) {
                tracing::trace!("frame dropped");
            }
        }) as Box<dyn FnMut()>);
        Self { window, callback }
    }
}

impl FrameScheduler for WebFrames {
    fn request_frame(&mut self) -> FrameRequest {
        match self.window.request_animation_frame(self.callback.as_ref().unchecked_ref()) {
            Ok(handle) => FrameRequest(u64::from(handle.unsigned_abs())),
            Err(err) => {
                tracing::warn!(?err, "requestAnimationFrame failed");
                FrameRequest(0)
            }
        }
    }

    fn cancel_frame(&mut self, request: FrameRequest) {
        let Ok(handle) = i32::try_from(request.0) else {
            return;
        };
        if let Err(err) = self.window.cancel_animation_frame(handle) {
            tracing::warn!(?err, "cancelAnimationFrame failed");
        }
    }
}
