use tincan_client::CallState;
use tincan_core::{IceCandidate, SignalMessage};

use crate::integration::{create_test_engine, init_tracing};
use crate::utils::{AnsweringPeer, MockMediaSource};

fn host_candidate(port: u16) -> IceCandidate {
    IceCandidate {
        candidate: format!("candidate:1 1 udp 2130706431 203.0.113.7 {port} typ host"),
        sdp_mid: Some("0".into()),
        sdp_m_line_index: Some(0),
    }
}

/// Candidates trickled ahead of the answer are held back, applied in
/// receipt order once the remote description lands, and the buffer stays
/// empty afterwards.
#[tokio::test]
async fn test_candidates_buffer_until_answer() {
    init_tracing();

    let (mut engine, mut signal_rx, _transport_rx) =
        create_test_engine(MockMediaSource::granting());
    let peer = AnsweringPeer::new().await.expect("answering peer");

    engine.start_call("room1".into()).await.expect("start call");
    let SignalMessage::Offer { sdp, .. } = signal_rx.recv().await.expect("offer") else {
        panic!("expected an offer first");
    };
    let answer_sdp = peer.answer(sdp).await.expect("answer");

    // Trickle races the answer: two candidates arrive early.
    engine.apply_candidate(host_candidate(50000)).await;
    engine.apply_candidate(host_candidate(50001)).await;
    assert_eq!(engine.pending_candidates(), 2);
    assert_eq!(engine.state(), CallState::AwaitingAnswer);

    engine.apply_answer(answer_sdp).await.expect("apply answer");
    assert_eq!(engine.state(), CallState::Connected);
    assert_eq!(engine.pending_candidates(), 0, "buffer must be drained");

    // From here on candidates apply immediately instead of buffering.
    engine.apply_candidate(host_candidate(50002)).await;
    assert_eq!(engine.pending_candidates(), 0);

    engine.hangup().await;
    peer.close().await.expect("close peer");
}

/// A candidate arriving with no call in progress still only lands in the
/// buffer; candidate handling never moves the state machine.
#[tokio::test]
async fn test_candidate_application_never_changes_state() {
    init_tracing();

    let (mut engine, _signal_rx, _transport_rx) =
        create_test_engine(MockMediaSource::granting());

    engine.apply_candidate(host_candidate(50000)).await;
    assert_eq!(engine.state(), CallState::Idle);
    assert_eq!(engine.pending_candidates(), 1);
}
