use super::*;

fn sample_frame() -> Frame {
    Frame {
        id: "id-1".to_owned(),
        ts: 42,
        from: Some("user-1".to_owned()),
        event: "line".to_owned(),
        data: serde_json::json!({
            "chunk": "0x0",
            "line": {
                "from": {"x": 1, "y": -2},
                "to": {"x": 3.5, "y": 4},
                "color": "#ff0000"
            },
            "ok": true,
            "nil": null
        }),
    }
}

#[test]
fn encode_decode_round_trip_preserves_frame() {
    let frame = sample_frame();
    let bytes = encode_frame(&frame);
    let decoded = decode_frame(&bytes).expect("decode should succeed");
    assert_eq!(decoded, frame);
}

#[test]
fn encode_frame_outputs_non_empty_binary() {
    let bytes = encode_frame(&sample_frame());
    assert!(!bytes.is_empty());
}

#[test]
fn decode_frame_rejects_malformed_bytes() {
    let err = decode_frame(&[0xff, 0x00, 0x01]).expect_err("bytes should fail");
    assert!(matches!(err, CodecError::Decode(_)));
}

#[test]
fn decode_frame_rejects_empty_event_name() {
    let wire = WireFrame {
        id: "id-1".to_owned(),
        ts: 1,
        from: None,
        event: String::new(),
        data: Some(json_to_proto_value(&serde_json::json!({}))),
    };
    let mut bytes = Vec::new();
    wire.encode(&mut bytes).expect("encode");

    let err = decode_frame(&bytes).expect_err("event should be required");
    assert!(matches!(err, CodecError::MissingEvent));
}

#[test]
fn decode_frame_defaults_missing_data_to_empty_object() {
    let wire = WireFrame {
        id: "id-1".to_owned(),
        ts: 1,
        from: None,
        event: "users".to_owned(),
        data: None,
    };
    let mut bytes = Vec::new();
    wire.encode(&mut bytes).expect("encode");

    let frame = decode_frame(&bytes).expect("decode");
    assert_eq!(frame.data, serde_json::json!({}));
}

#[test]
fn decode_frame_converts_nan_number_to_json_null() {
    let wire = WireFrame {
        id: "id-1".to_owned(),
        ts: 1,
        from: None,
        event: "cursor".to_owned(),
        data: Some(prost_types::Value {
            kind: Some(prost_types::value::Kind::NumberValue(f64::NAN)),
        }),
    };
    let mut bytes = Vec::new();
    wire.encode(&mut bytes).expect("encode");

    let frame = decode_frame(&bytes).expect("decode");
    assert_eq!(frame.data, Value::Null);
}

#[test]
fn whole_numbers_decode_as_json_integers() {
    let frame = Frame::new("id-int", 1, "bounds", serde_json::json!({"x": 10000.0, "y": -20000.0}));

    let decoded = decode_frame(&encode_frame(&frame)).expect("decode");
    assert_eq!(decoded.data.get("x"), Some(&serde_json::json!(10000)));
    assert_eq!(decoded.data.get("y"), Some(&serde_json::json!(-20000)));
}

#[test]
fn fractional_numbers_stay_floats() {
    let frame = Frame::new("id-frac", 1, "cursor", serde_json::json!({"x": 0.25}));

    let decoded = decode_frame(&encode_frame(&frame)).expect("decode");
    assert_eq!(decoded.data.get("x"), Some(&serde_json::json!(0.25)));
}

#[test]
fn with_from_sets_sender() {
    let frame = Frame::new("id", 0, "message", Value::Null).with_from("peer");
    assert_eq!(frame.from.as_deref(), Some("peer"));
    assert_eq!(frame.event, "message");
}

#[test]
fn frame_serializes_to_json_with_event_field() {
    let frame = Frame::new("id", 7, "name", serde_json::json!("ada"));
    let json = serde_json::to_value(&frame).expect("serialize");
    assert_eq!(json.get("event"), Some(&serde_json::json!("name")));
    assert_eq!(json.get("data"), Some(&serde_json::json!("ada")));
}
