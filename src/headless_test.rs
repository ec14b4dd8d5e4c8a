use super::*;

#[test]
fn format_message_marks_own_lines() {
    assert_eq!(format_message(&Message::from_self("ada", "#000", "hi")), "ada (you): hi");
    let other = Message::User { name: "bob".into(), color: "#000".into(), body: "yo".into(), from_self: false };
    assert_eq!(format_message(&other), "bob: yo");
}

#[test]
fn format_message_renders_presence_lines() {
    assert_eq!(format_message(&Message::join("ada")), "* ada joined");
    assert_eq!(format_message(&Message::leave("ada")), "* ada left");
}

#[test]
fn trace_surface_counts_through_clones() {
    let surface = TraceSurface::new(Size::new(10.0, 10.0));
    let mut boxed: Box<dyn Surface> = Box::new(surface.clone());
    boxed.clear();
    boxed.stroke_line(Coordinate::ZERO, Coordinate::new(1.0, 1.0), "#000");
    boxed.stroke_line(Coordinate::ZERO, Coordinate::new(2.0, 2.0), "#000");

    assert_eq!(surface.clears(), 1);
    assert_eq!(surface.strokes(), 2);
    assert_eq!(boxed.size(), Size::new(10.0, 10.0));
}

#[test]
fn tick_frames_fire_once_per_request() {
    let frames = TickFrames::default();
    let mut scheduler = frames.clone();

    assert!(frames.take().is_none());
    let first = scheduler.request_frame();
    assert_eq!(frames.take(), Some(first));
    assert!(frames.take().is_none());

    let second = scheduler.request_frame();
    assert_ne!(first, second);
    scheduler.cancel_frame(second);
    assert!(frames.take().is_none());
}

#[test]
fn cancelling_a_stale_request_keeps_the_pending_one() {
    let frames = TickFrames::default();
    let mut scheduler = frames.clone();
    let stale = scheduler.request_frame();
    let current = scheduler.request_frame();

    scheduler.cancel_frame(stale);

    assert_eq!(frames.take(), Some(current));
}

#[test]
fn detached_events_track_active_listeners() {
    let events = DetachedEvents::default();
    let mut target = events.clone();
    let a = target.listen(ListenerKind::KeyDown);
    let b = target.listen(ListenerKind::KeyUp);
    assert_ne!(a, b);
    assert_eq!(events.active(), 2);

    target.unlisten(a);
    target.unlisten(b);
    assert_eq!(events.active(), 0);
}
