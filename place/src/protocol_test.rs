use serde_json::json;

use super::*;
use crate::geometry::Size;

fn c(x: f64, y: f64) -> Coordinate {
    Coordinate::new(x, y)
}

fn frame(event: &str, data: Value) -> Frame {
    Frame::new("f-1", 0, event, data)
}

// =============================================================
// Outbound
// =============================================================

#[test]
fn outbound_event_names() {
    let line = Line::new(c(0.0, 0.0), c(1.0, 1.0), "#000");
    let events: Vec<&str> = [
        Outbound::Bounds(Bounds::default()),
        Outbound::Cursor(Coordinate::ZERO),
        Outbound::Line(line),
        Outbound::Name("n".to_owned()),
        Outbound::Color("#fff".to_owned()),
        Outbound::Message("hi".to_owned()),
    ]
    .iter()
    .map(Outbound::event)
    .collect();
    assert_eq!(events, vec!["bounds", "cursor", "line", "name", "color", "message"]);
}

#[test]
fn bounds_payload_has_lower_and_upper() {
    let bounds = Bounds::from_location(Coordinate::ZERO, Size::new(800.0, 600.0));
    let payload = Outbound::Bounds(bounds).payload();
    assert_eq!(payload, json!({"lower": {"x": 0.0, "y": 0.0}, "upper": {"x": 800.0, "y": 600.0}}));
}

#[test]
fn string_events_carry_bare_strings() {
    assert_eq!(Outbound::Message("hi".to_owned()).payload(), json!("hi"));
    assert_eq!(Outbound::Name("ada".to_owned()).payload(), json!("ada"));
    assert_eq!(Outbound::Color("#123".to_owned()).payload(), json!("#123"));
}

#[test]
fn outbound_frames_get_unique_ids() {
    let a = Outbound::Cursor(c(1.0, 2.0)).to_frame();
    let b = Outbound::Cursor(c(1.0, 2.0)).to_frame();
    assert_ne!(a.id, b.id);
    assert_eq!(a.event, "cursor");
    assert_eq!(a.data, json!({"x": 1.0, "y": 2.0}));
}

// =============================================================
// Inbound
// =============================================================

#[test]
fn decodes_name() {
    let event = Inbound::from_frame(&frame("name", json!("guest-42"))).expect("name");
    assert_eq!(event, Inbound::Name("guest-42".to_owned()));
}

#[test]
fn decodes_users_snapshot() {
    let event = Inbound::from_frame(&frame(
        "users",
        json!([{"id": "u1", "name": "bob", "color": "#f00", "cursor": {"x": 5, "y": 6}}]),
    ))
    .expect("users");
    let Inbound::Users(users) = event else {
        panic!("expected users, got {event:?}");
    };
    assert_eq!(users.len(), 1);
    assert_eq!(users[0].cursor, c(5.0, 6.0));
}

#[test]
fn decodes_chunk_with_lines() {
    let event = Inbound::from_frame(&frame(
        "chunk",
        json!({
            "id": "0x0", "x": 0, "y": 0,
            "lines": [{"from": {"x": 1, "y": 1}, "to": {"x": 2, "y": 2}, "color": "#000"}]
        }),
    ))
    .expect("chunk");
    let Inbound::Chunk(chunk) = event else {
        panic!("expected chunk, got {event:?}");
    };
    assert_eq!(chunk.id, "0x0");
    assert_eq!(chunk.lines.len(), 1);
}

#[test]
fn decodes_line_with_chunk_id() {
    let event = Inbound::from_frame(&frame(
        "line",
        json!({"chunk": "1x0", "line": {"from": {"x": 10000, "y": 1}, "to": {"x": 10001, "y": 2}, "color": "#0f0"}}),
    ))
    .expect("line");
    assert_eq!(
        event,
        Inbound::Line {
            chunk_id: "1x0".to_owned(),
            line: Line::new(c(10_000.0, 1.0), c(10_001.0, 2.0), "#0f0"),
        }
    );
}

#[test]
fn decodes_history_and_single_message() {
    let history = Inbound::from_frame(&frame(
        "messages",
        json!([{"type": "join", "name": "a"}, {"type": "user", "name": "a", "color": "#000", "body": "hey"}]),
    ))
    .expect("messages");
    let Inbound::Messages(list) = history else {
        panic!("expected messages, got {history:?}");
    };
    assert_eq!(list.len(), 2);

    let single = Inbound::from_frame(&frame("message", json!({"type": "leave", "name": "a"}))).expect("message");
    assert_eq!(single, Inbound::Message(Message::leave("a")));
}

#[test]
fn unknown_event_is_an_error() {
    let err = Inbound::from_frame(&frame("teleport", json!({}))).expect_err("unknown");
    assert!(matches!(err, ProtocolError::UnknownEvent(ref name) if name == "teleport"));
}

#[test]
fn malformed_payload_is_an_error() {
    let err = Inbound::from_frame(&frame("chunk", json!({"id": 7}))).expect_err("bad chunk");
    assert!(matches!(err, ProtocolError::Payload { event: "chunk", .. }));
}

#[test]
fn inbound_frames_survive_the_wire_codec() {
    let event = Inbound::Line {
        chunk_id: "0x0".to_owned(),
        line: Line::new(c(1.0, 2.0), c(3.0, 4.0), "#abc"),
    };
    let bytes = frames::encode_frame(&event.to_frame());
    let decoded = frames::decode_frame(&bytes).expect("decode");
    assert_eq!(Inbound::from_frame(&decoded).expect("inbound"), event);
}

#[test]
fn unserializable_payload_falls_back_to_null() {
    let mut keyed = std::collections::BTreeMap::new();
    keyed.insert((1, 2), "tuple keys have no JSON form");
    assert_eq!(to_value(&keyed), Value::Null);
    assert_eq!(to_value(&c(1.0, 2.0)), json!({"x": 1.0, "y": 2.0}));
}
