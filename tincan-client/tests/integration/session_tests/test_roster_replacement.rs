use std::sync::Arc;

use tincan_client::RoomSession;
use tincan_core::{ClientId, RoomMeta};

use crate::integration::{init_tracing, test_room};
use crate::utils::MockSignalingOutput;

fn roster(ids: &[&str]) -> Vec<ClientId> {
    ids.iter().map(|id| ClientId::from(*id)).collect()
}

#[tokio::test]
async fn test_roster_is_replaced_wholesale_and_idempotently() {
    init_tracing();

    let (signaling, _rx) = MockSignalingOutput::new();
    let mut session = RoomSession::new(ClientId::generate(), Arc::new(signaling));
    session.join(test_room("room1")).await.expect("join");

    session.apply_roster(roster(&["a", "b"]), None);
    assert_eq!(session.participants(), roster(&["a", "b"]));

    // Duplicate delivery leaves the roster untouched.
    session.apply_roster(roster(&["a", "b"]), None);
    assert_eq!(session.participants(), roster(&["a", "b"]));

    // Replacement, not a diff: nothing from the old roster survives.
    session.apply_roster(roster(&["c"]), None);
    assert_eq!(session.participants(), roster(&["c"]));
}

/// A roster arriving while no room is joined is accepted and stored; there
/// is no "joined" gate on roster application.
#[tokio::test]
async fn test_roster_accepted_without_a_room() {
    init_tracing();

    let (signaling, _rx) = MockSignalingOutput::new();
    let mut session = RoomSession::new(ClientId::generate(), Arc::new(signaling));

    session.apply_roster(roster(&["a", "b"]), None);
    assert!(session.current_room().is_none());
    assert_eq!(session.participants(), roster(&["a", "b"]));
}

#[tokio::test]
async fn test_room_meta_updates_only_when_present() {
    init_tracing();

    let (signaling, _rx) = MockSignalingOutput::new();
    let mut session = RoomSession::new(ClientId::generate(), Arc::new(signaling));

    let mut meta = RoomMeta::new();
    meta.insert("creator".into(), "admin".into());
    session.apply_roster(roster(&["a"]), Some(meta.clone()));
    assert_eq!(session.room_meta(), &meta);

    // A roster without meta keeps the previous meta.
    session.apply_roster(roster(&["a", "b"]), None);
    assert_eq!(session.room_meta(), &meta);
}
