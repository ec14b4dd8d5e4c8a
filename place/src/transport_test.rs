use futures::StreamExt;
use futures::executor::block_on;

use super::*;
use crate::geometry::Coordinate;

#[test]
fn emitted_events_arrive_as_frames() {
    let (mut transport, mut rx) = ChannelTransport::channel();
    transport.emit(&Outbound::Name("ada".to_owned()));
    transport.emit(&Outbound::Cursor(Coordinate::new(1.0, 2.0)));

    let first = block_on(rx.next()).expect("first frame");
    let second = block_on(rx.next()).expect("second frame");
    assert_eq!(first.event, "name");
    assert_eq!(first.data, serde_json::json!("ada"));
    assert_eq!(second.event, "cursor");
}

#[test]
fn close_ends_the_stream_after_pending_frames() {
    let (mut transport, mut rx) = ChannelTransport::channel();
    transport.emit(&Outbound::Message("bye".to_owned()));
    transport.close();

    assert!(!transport.is_open());
    assert_eq!(block_on(rx.next()).map(|frame| frame.event), Some("message".to_owned()));
    assert!(block_on(rx.next()).is_none());
}

#[test]
fn emit_after_close_is_dropped() {
    let (mut transport, mut rx) = ChannelTransport::channel();
    transport.close();
    transport.emit(&Outbound::Message("late".to_owned()));
    assert!(block_on(rx.next()).is_none());
}

#[test]
fn emit_after_receiver_dropped_does_not_fail() {
    let (mut transport, rx) = ChannelTransport::channel();
    drop(rx);
    transport.emit(&Outbound::Message("nobody".to_owned()));
    assert!(!transport.is_open());
}
