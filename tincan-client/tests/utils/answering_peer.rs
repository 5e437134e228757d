use anyhow::{Context, Result};
use std::sync::Arc;
use tincan_core::IceCandidate;
use tokio::sync::Mutex;
use webrtc::api::APIBuilder;
use webrtc::api::interceptor_registry::register_default_interceptors;
use webrtc::api::media_engine::MediaEngine;
use webrtc::ice_transport::ice_candidate::RTCIceCandidateInit;
use webrtc::interceptor::registry::Registry;
use webrtc::peer_connection::RTCPeerConnection;
use webrtc::peer_connection::configuration::RTCConfiguration;
use webrtc::peer_connection::sdp::session_description::RTCSessionDescription;

/// Answerer half of a local loopback negotiation, standing in for the
/// remote peer behind the relay. No ICE servers: host candidates are
/// enough on one machine.
pub struct AnsweringPeer {
    peer_connection: Arc<RTCPeerConnection>,
    /// Candidates this side gathered (to be trickled to the offerer).
    ice_candidates: Arc<Mutex<Vec<IceCandidate>>>,
}

impl AnsweringPeer {
    pub async fn new() -> Result<Self> {
        let mut media_engine = MediaEngine::default();
        media_engine.register_default_codecs()?;

        let registry = register_default_interceptors(Registry::new(), &mut media_engine)?;

        let api = APIBuilder::new()
            .with_media_engine(media_engine)
            .with_interceptor_registry(registry)
            .build();

        let peer_connection = Arc::new(
            api.new_peer_connection(RTCConfiguration::default())
                .await?,
        );

        let ice_candidates = Arc::new(Mutex::new(Vec::new()));
        let candidates_clone = Arc::clone(&ice_candidates);
        peer_connection.on_ice_candidate(Box::new(move |candidate| {
            let candidates = Arc::clone(&candidates_clone);
            Box::pin(async move {
                let Some(candidate) = candidate else { return };
                let Ok(init) = candidate.to_json() else {
                    return;
                };
                candidates.lock().await.push(IceCandidate {
                    candidate: init.candidate,
                    sdp_mid: init.sdp_mid,
                    sdp_m_line_index: init.sdp_mline_index,
                });
            })
        }));

        Ok(Self {
            peer_connection,
            ice_candidates,
        })
    }

    /// Accept the offerer's SDP and produce the answer.
    pub async fn answer(&self, offer_sdp: String) -> Result<String> {
        let offer = RTCSessionDescription::offer(offer_sdp)?;
        self.peer_connection
            .set_remote_description(offer)
            .await
            .context("Failed to set remote offer")?;

        let answer = self
            .peer_connection
            .create_answer(None)
            .await
            .context("Failed to create answer")?;
        self.peer_connection
            .set_local_description(answer.clone())
            .await
            .context("Failed to set local description")?;

        Ok(answer.sdp)
    }

    /// Wait for ICE gathering and return whatever was collected.
    pub async fn gather_ice_candidates(&self, timeout_ms: u64) -> Result<Vec<IceCandidate>> {
        let mut gathering_complete = self.peer_connection.gathering_complete_promise().await;

        let _ = tokio::time::timeout(
            std::time::Duration::from_millis(timeout_ms),
            gathering_complete.recv(),
        )
        .await;

        Ok(self.ice_candidates.lock().await.clone())
    }

    /// Add a candidate trickled from the offerer.
    pub async fn add_ice_candidate(&self, candidate: IceCandidate) -> Result<()> {
        let init = RTCIceCandidateInit {
            candidate: candidate.candidate,
            sdp_mid: candidate.sdp_mid,
            sdp_mline_index: candidate.sdp_m_line_index,
            username_fragment: None,
        };
        self.peer_connection
            .add_ice_candidate(init)
            .await
            .context("Failed to add ICE candidate")?;
        Ok(())
    }

    pub async fn close(&self) -> Result<()> {
        self.peer_connection
            .close()
            .await
            .context("Failed to close peer connection")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_answering_peer_answers_a_real_offer() {
        let offerer = AnsweringPeer::new().await.expect("offerer side");
        let answerer = AnsweringPeer::new().await.expect("answerer side");

        // Reuse the peer as a bare offerer: one recvonly audio m-line.
        offerer
            .peer_connection
            .add_transceiver_from_kind(webrtc::rtp_transceiver::rtp_codec::RTPCodecType::Audio, None)
            .await
            .expect("add transceiver");
        let offer = offerer
            .peer_connection
            .create_offer(None)
            .await
            .expect("create offer");
        offerer
            .peer_connection
            .set_local_description(offer.clone())
            .await
            .expect("set local offer");

        let answer = answerer.answer(offer.sdp).await.expect("answer");
        assert!(answer.contains("v=0"));
    }
}
