use std::sync::Arc;

use tincan_client::{ChannelEvent, ClientEvent};
use tincan_core::SignalMessage;

use crate::integration::dispatch_tests::{raw, spawn_test_client};
use crate::integration::init_tracing;
use crate::utils::MockSignalingOutput;

/// An unknown tag or a garbage frame is a diagnostic, not a crash: the loop
/// keeps dispatching whatever follows.
#[tokio::test]
async fn test_malformed_frames_are_dropped() {
    init_tracing();

    let (signaling, _signal_rx) = MockSignalingOutput::new();
    let (_handle, chan_tx, mut events) = spawn_test_client(Arc::new(signaling));

    chan_tx
        .send(ChannelEvent::Message(r#"{"type":"unknown"}"#.into()))
        .expect("inject unknown tag");
    chan_tx
        .send(ChannelEvent::Message("not json at all".into()))
        .expect("inject garbage");
    chan_tx
        .send(raw(&SignalMessage::Participants {
            participants: vec!["client-a".into()],
            room_info: None,
        }))
        .expect("inject roster");

    match events.recv().await {
        Some(ClientEvent::RosterUpdated { participants }) => {
            assert_eq!(participants.len(), 1);
        }
        other => panic!(
            "loop should have survived the bad frames, got {:?}",
            other.map(|e| e.to_string())
        ),
    }
}
