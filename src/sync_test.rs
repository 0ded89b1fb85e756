use super::*;
use crate::stroke::{CurrentStroke, ToolSettings};

#[test]
fn decode_accepts_a_stroke_event() {
    let mut current = CurrentStroke::begin(&ToolSettings::default(), 10.0, 20.0);
    current.push_point(30.0, 40.0);
    let stroke = current.finish();
    let json = serde_json::to_string(&stroke).expect("serialize");

    let decoded = decode_stroke(&json).expect("decode");
    assert_eq!(decoded, stroke);
}

#[test]
fn decode_drops_malformed_payloads() {
    assert!(decode_stroke("not json at all").is_none());
    assert!(decode_stroke("{\"unexpected\":true}").is_none());
    assert!(decode_stroke("").is_none());
}

#[tokio::test]
async fn publish_before_connect_is_dropped_silently() {
    // Port 9 (discard) is never a websocket server; the channel stays down.
    let (channel, _incoming) = SyncChannel::connect("ws://127.0.0.1:9/whiteboard", Duration::from_secs(60));

    assert!(!channel.is_connected());
    let stroke = CurrentStroke::begin(&ToolSettings::default(), 0.0, 0.0).finish();
    // Must neither panic nor surface an error to the caller.
    channel.publish(&stroke);
    assert!(!channel.is_connected());
}
