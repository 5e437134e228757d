use crate::engine::call_state::CallState;
use crate::error::ClientError;
use crate::media::MediaSource;
use crate::signaling::SignalingOutput;
use crate::transport::{ConnectionWrapper, TransportConfig, TransportEvent};
use std::sync::Arc;
use tincan_core::{ClientId, IceCandidate, RoomId, SignalMessage};
use tokio::sync::mpsc;
use tracing::{info, warn};
use webrtc::track::track_local::track_local_static_sample::TrackLocalStaticSample;

/// Drives the offer/answer/ICE state machine for the one active peer
/// connection.
///
/// ICE trickling can race the offer/answer exchange: a remote candidate may
/// arrive before the answer that establishes the remote description, and
/// applying it at that point is invalid. Such candidates are buffered and
/// drained in receipt order once the answer lands; after that the buffer
/// stays empty for the rest of the connection's life. Locally gathered
/// candidates are forwarded the moment they surface.
pub struct CallEngine {
    client_id: ClientId,
    signaling: Arc<dyn SignalingOutput>,
    media: Arc<dyn MediaSource>,
    transport_config: TransportConfig,
    event_tx: mpsc::Sender<TransportEvent>,
    state: CallState,
    room_id: Option<RoomId>,
    transport: Option<ConnectionWrapper>,
    local_tracks: Vec<Arc<TrackLocalStaticSample>>,
    pending_remote_candidates: Vec<IceCandidate>,
    has_remote_description: bool,
}

impl CallEngine {
    pub fn new(
        client_id: ClientId,
        signaling: Arc<dyn SignalingOutput>,
        media: Arc<dyn MediaSource>,
        transport_config: TransportConfig,
        event_tx: mpsc::Sender<TransportEvent>,
    ) -> Self {
        Self {
            client_id,
            signaling,
            media,
            transport_config,
            event_tx,
            state: CallState::Idle,
            room_id: None,
            transport: None,
            local_tracks: Vec::new(),
            pending_remote_candidates: Vec::new(),
            has_remote_description: false,
        }
    }

    pub fn state(&self) -> CallState {
        self.state
    }

    pub fn room_id(&self) -> Option<&RoomId> {
        self.room_id.as_ref()
    }

    pub fn has_transport(&self) -> bool {
        self.transport.is_some()
    }

    /// Remote candidates waiting for the remote description.
    pub fn pending_candidates(&self) -> usize {
        self.pending_remote_candidates.len()
    }

    /// `Idle → AcquiringMedia → Offering → AwaitingAnswer`.
    ///
    /// Emits the `offer` envelope exactly once. Every failure along the way
    /// lands in `Failed` and is returned to the caller; capture failure is
    /// typically a permission denial, so nothing is retried.
    pub async fn start_call(&mut self, room_id: RoomId) -> Result<(), ClientError> {
        self.pending_remote_candidates.clear();
        self.has_remote_description = false;
        self.room_id = Some(room_id.clone());
        self.state = CallState::AcquiringMedia;

        let tracks = match self.media.acquire_audio().await {
            Ok(tracks) => tracks,
            Err(err) => {
                warn!("Audio capture failed: {err}");
                self.state = CallState::Failed;
                return Err(ClientError::MediaAcquisitionDenied(err));
            }
        };

        let transport =
            match ConnectionWrapper::new(self.transport_config.clone(), self.event_tx.clone())
                .await
            {
                Ok(transport) => transport,
                Err(err) => return Err(self.fail(err)),
            };

        if let Err(err) = transport.add_tracks(&tracks).await {
            return Err(self.fail(err));
        }
        self.local_tracks = tracks;
        self.state = CallState::Offering;

        let sdp = match transport.create_offer().await {
            Ok(sdp) => sdp,
            Err(err) => return Err(self.fail(err)),
        };
        self.transport = Some(transport);

        let message = SignalMessage::Offer {
            sdp,
            room_id: room_id.clone(),
            client_id: self.client_id.clone(),
        };
        if let Err(err) = self.signaling.send(message).await {
            self.state = CallState::Failed;
            return Err(err);
        }

        self.state = CallState::AwaitingAnswer;
        info!("Offer sent for room '{room_id}', awaiting answer");
        Ok(())
    }

    /// `AwaitingAnswer → Connected`. Applies the remote description, then
    /// drains the buffered candidates in receipt order; the buffer stays
    /// empty for the rest of this connection's life. A rejected description
    /// is fatal to the call and discards the buffer.
    pub async fn apply_answer(&mut self, sdp: String) -> Result<(), ClientError> {
        if self.state != CallState::AwaitingAnswer {
            warn!("Answer arrived in state {:?}, dropped", self.state);
            return Ok(());
        }
        let Some(transport) = &self.transport else {
            warn!("Answer arrived with no active peer connection, dropped");
            return Ok(());
        };

        if let Err(err) = transport.set_remote_answer(sdp).await {
            self.pending_remote_candidates.clear();
            self.state = CallState::Failed;
            return Err(ClientError::NegotiationRejected(err));
        }
        self.has_remote_description = true;

        for candidate in self.pending_remote_candidates.drain(..) {
            // ICE has its own redundancy; one bad candidate is not fatal.
            if let Err(err) = transport.add_ice_candidate(candidate).await {
                warn!("Failed to apply buffered ICE candidate: {err:?}");
            }
        }

        self.state = CallState::Connected;
        info!("Remote description set, call connected");
        Ok(())
    }

    /// Applies a remote candidate immediately once the remote description
    /// exists, otherwise buffers it. Never changes the call state.
    pub async fn apply_candidate(&mut self, candidate: IceCandidate) {
        if !self.has_remote_description {
            self.pending_remote_candidates.push(candidate);
            return;
        }
        let Some(transport) = &self.transport else {
            warn!("ICE candidate arrived with no active peer connection, dropped");
            return;
        };
        if let Err(err) = transport.add_ice_candidate(candidate).await {
            warn!("Failed to apply ICE candidate: {err:?}");
        }
    }

    /// Forwards one locally gathered candidate to the server. The outgoing
    /// side is never buffered.
    pub async fn forward_local_candidate(
        &self,
        candidate: IceCandidate,
    ) -> Result<(), ClientError> {
        let Some(room_id) = &self.room_id else {
            // Gathering can lag a hangup; nowhere to send these anymore.
            return Ok(());
        };
        self.signaling
            .send(SignalMessage::Candidate {
                candidate,
                room_id: room_id.clone(),
                client_id: self.client_id.clone(),
            })
            .await
    }

    /// Tears down whatever connection exists and lands in `Closed`, from
    /// any state. Idempotent; this is the sole cancellation primitive.
    pub async fn hangup(&mut self) {
        if let Some(transport) = self.transport.take() {
            if let Err(err) = transport.close().await {
                warn!("Error closing peer connection: {err:?}");
            }
            info!("Call closed");
        }
        self.local_tracks.clear();
        self.pending_remote_candidates.clear();
        self.has_remote_description = false;
        self.room_id = None;
        self.state = CallState::Closed;
    }

    fn fail(&mut self, err: anyhow::Error) -> ClientError {
        self.state = CallState::Failed;
        ClientError::NegotiationRejected(err)
    }
}
