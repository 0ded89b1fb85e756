use super::*;
use tokio::time::{Duration, timeout};

use crate::stroke::{CurrentStroke, ToolSettings};

async fn seed_client(state: &RelayState) -> (Uuid, mpsc::Receiver<String>) {
    let client_id = Uuid::new_v4();
    let (tx, rx) = mpsc::channel(8);
    state
        .clients
        .write()
        .await
        .insert(client_id, ClientHandle { username: "test".into(), tx });
    (client_id, rx)
}

fn stroke_json() -> String {
    let mut current = CurrentStroke::begin(&ToolSettings::default(), 10.0, 20.0);
    current.push_point(30.0, 40.0);
    serde_json::to_string(&current.finish()).expect("serialize")
}

async fn recv_payload(rx: &mut mpsc::Receiver<String>) -> String {
    timeout(Duration::from_millis(200), rx.recv())
        .await
        .expect("fan-out receive timed out")
        .expect("fan-out channel closed unexpectedly")
}

async fn assert_no_payload(rx: &mut mpsc::Receiver<String>) {
    assert!(
        timeout(Duration::from_millis(80), rx.recv()).await.is_err(),
        "expected no fan-out payload"
    );
}

#[tokio::test]
async fn stroke_event_reaches_every_peer_but_not_the_sender() {
    let state = RelayState::new();
    let (sender, mut sender_rx) = seed_client(&state).await;
    let (_peer_a, mut rx_a) = seed_client(&state).await;
    let (_peer_b, mut rx_b) = seed_client(&state).await;

    let payload = stroke_json();
    let forwarded = relay_stroke_event(&state, sender, &payload).await;
    assert_eq!(forwarded, 2);

    assert_eq!(recv_payload(&mut rx_a).await, payload);
    assert_eq!(recv_payload(&mut rx_b).await, payload);
    assert_no_payload(&mut sender_rx).await;
}

#[tokio::test]
async fn forwarded_payload_preserves_stroke_fields() {
    let state = RelayState::new();
    let (sender, _sender_rx) = seed_client(&state).await;
    let (_peer, mut rx) = seed_client(&state).await;

    let payload = stroke_json();
    relay_stroke_event(&state, sender, &payload).await;

    let received: Stroke = serde_json::from_str(&recv_payload(&mut rx).await).expect("decode");
    let original: Stroke = serde_json::from_str(&payload).expect("decode");
    assert_eq!(received, original);
    assert_eq!(received.points, vec![10.0, 20.0, 30.0, 40.0]);
}

#[tokio::test]
async fn malformed_payload_is_dropped_and_reaches_nobody() {
    let state = RelayState::new();
    let (sender, _sender_rx) = seed_client(&state).await;
    let (_peer, mut rx) = seed_client(&state).await;

    let forwarded = relay_stroke_event(&state, sender, "{ not json").await;
    assert_eq!(forwarded, 0);
    assert_no_payload(&mut rx).await;

    // The connection keeps relaying valid events afterwards.
    let payload = stroke_json();
    assert_eq!(relay_stroke_event(&state, sender, &payload).await, 1);
    assert_eq!(recv_payload(&mut rx).await, payload);
}

#[tokio::test]
async fn relay_with_a_single_client_forwards_nothing() {
    let state = RelayState::new();
    let (sender, mut sender_rx) = seed_client(&state).await;

    assert_eq!(relay_stroke_event(&state, sender, &stroke_json()).await, 0);
    assert_no_payload(&mut sender_rx).await;
}

#[tokio::test]
async fn extra_fields_survive_the_hop() {
    let state = RelayState::new();
    let (sender, _sender_rx) = seed_client(&state).await;
    let (_peer, mut rx) = seed_client(&state).await;

    // A newer client might send fields this relay doesn't know about; the
    // raw payload is forwarded untouched.
    let payload = format!(
        r#"{{"id":"{}","type":"draw","shape":"line","color":"black","lineWidth":2,"rotation":0,"points":[1,2,3,4],"pressure":[0.5,0.7]}}"#,
        Uuid::new_v4()
    );
    assert_eq!(relay_stroke_event(&state, sender, &payload).await, 1);
    assert_eq!(recv_payload(&mut rx).await, payload);
}
