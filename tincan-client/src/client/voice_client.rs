use crate::client::command::ClientCommand;
use crate::client::event::ClientEvent;
use crate::engine::CallEngine;
use crate::error::ClientError;
use crate::media::MediaSource;
use crate::session::RoomSession;
use crate::signaling::{ChannelEvent, SignalChannel, SignalingOutput};
use crate::transport::{TransportConfig, TransportEvent};
use std::sync::Arc;
use tincan_core::{ClientId, RoomDescriptor, SignalMessage, codec};
use tokio::sync::mpsc;
use tracing::{info, warn};

/// Handle for driving the client loop. All calls are serialized through the
/// command channel, so a multi-threaded host needs no extra locking: state
/// is only ever mutated on the dispatch path.
#[derive(Clone)]
pub struct ClientHandle {
    cmd_tx: mpsc::Sender<ClientCommand>,
}

impl ClientHandle {
    /// Join `room` and start a call. The outcome arrives as a `ClientEvent`.
    pub async fn join(&self, room: RoomDescriptor) -> Result<(), ClientError> {
        self.cmd_tx
            .send(ClientCommand::Join(room))
            .await
            .map_err(|_| ClientError::ChannelNotOpen)
    }

    /// Leave the current room and tear down the call. Safe in any state.
    pub async fn leave(&self) -> Result<(), ClientError> {
        self.cmd_tx
            .send(ClientCommand::Leave)
            .await
            .map_err(|_| ClientError::ChannelNotOpen)
    }
}

/// The dispatch loop: routes inbound envelopes by tag to the session or the
/// engine, forwards locally gathered candidates outbound, and surfaces
/// everything observable as `ClientEvent`s.
pub struct VoiceClient {
    session: RoomSession,
    engine: CallEngine,
    channel_rx: mpsc::UnboundedReceiver<ChannelEvent>,
    transport_rx: mpsc::Receiver<TransportEvent>,
    cmd_rx: mpsc::Receiver<ClientCommand>,
    event_tx: mpsc::UnboundedSender<ClientEvent>,
}

impl VoiceClient {
    /// Opens the signaling channel and spawns the dispatch loop.
    pub async fn connect(
        url: &str,
        transport_config: TransportConfig,
        media: Arc<dyn MediaSource>,
    ) -> Result<(ClientHandle, mpsc::UnboundedReceiver<ClientEvent>), ClientError> {
        let (channel, channel_rx) = SignalChannel::open(url).await?;
        let (client, handle, events) = VoiceClient::new(
            ClientId::generate(),
            Arc::new(channel),
            channel_rx,
            transport_config,
            media,
        );
        tokio::spawn(client.run());
        Ok((handle, events))
    }

    /// Builds the loop around an already-established signaling output.
    pub fn new(
        client_id: ClientId,
        signaling: Arc<dyn SignalingOutput>,
        channel_rx: mpsc::UnboundedReceiver<ChannelEvent>,
        transport_config: TransportConfig,
        media: Arc<dyn MediaSource>,
    ) -> (
        Self,
        ClientHandle,
        mpsc::UnboundedReceiver<ClientEvent>,
    ) {
        let (transport_tx, transport_rx) = mpsc::channel(256);
        let (cmd_tx, cmd_rx) = mpsc::channel(16);
        let (event_tx, event_rx) = mpsc::unbounded_channel();

        let session = RoomSession::new(client_id.clone(), Arc::clone(&signaling));
        let engine = CallEngine::new(client_id, signaling, media, transport_config, transport_tx);

        let client = Self {
            session,
            engine,
            channel_rx,
            transport_rx,
            cmd_rx,
            event_tx,
        };
        (client, ClientHandle { cmd_tx }, event_rx)
    }

    /// One inbound item is fully dispatched (parsed, routed, state mutated,
    /// resulting messages sent) before the next is taken.
    pub async fn run(mut self) {
        info!("Client loop started");

        loop {
            tokio::select! {
                cmd = self.cmd_rx.recv() => {
                    match cmd {
                        Some(cmd) => self.handle_command(cmd).await,
                        None => {
                            info!("Command channel closed, shutting down");
                            self.teardown().await;
                            break;
                        }
                    }
                }

                event = self.channel_rx.recv() => {
                    match event {
                        Some(ChannelEvent::Message(raw)) => self.dispatch_raw(&raw).await,
                        Some(ChannelEvent::Closed(reason)) => {
                            self.teardown().await;
                            let _ = self.event_tx.send(ClientEvent::ChannelClosed(reason));
                            break;
                        }
                        Some(ChannelEvent::Error(cause)) => {
                            warn!("Signaling channel error: {cause}");
                            self.teardown().await;
                            let _ = self.event_tx.send(ClientEvent::ChannelClosed(Some(cause)));
                            break;
                        }
                        None => {
                            warn!("Signaling channel gone");
                            self.teardown().await;
                            break;
                        }
                    }
                }

                event = self.transport_rx.recv() => {
                    match event {
                        Some(event) => self.handle_transport_event(event).await,
                        None => {
                            warn!("Transport event channel closed unexpectedly");
                            break;
                        }
                    }
                }
            }
        }

        info!("Client loop finished");
    }

    async fn handle_command(&mut self, cmd: ClientCommand) {
        match cmd {
            ClientCommand::Join(room) => {
                let room_id = room.id.clone();
                if let Err(err) = self.session.join(room).await {
                    warn!("Join failed: {err}");
                    let _ = self.event_tx.send(ClientEvent::CallFailed(err));
                    return;
                }
                if let Err(err) = self.engine.start_call(room_id).await {
                    warn!("Call failed: {err}");
                    let _ = self.event_tx.send(ClientEvent::CallFailed(err));
                }
            }

            ClientCommand::Leave => {
                self.teardown().await;
                let _ = self.event_tx.send(ClientEvent::CallEnded);
            }
        }
    }

    /// Decode failures are contained here: a bad frame is a diagnostic,
    /// never a crash of the session.
    async fn dispatch_raw(&mut self, raw: &str) {
        match codec::decode(raw) {
            Ok(message) => self.dispatch(message).await,
            Err(err) => warn!("Dropping inbound frame: {err}"),
        }
    }

    /// Pure routing over the envelope tag.
    async fn dispatch(&mut self, message: SignalMessage) {
        match message {
            SignalMessage::Answer { sdp } => {
                if let Err(err) = self.engine.apply_answer(sdp).await {
                    warn!("Negotiation failed: {err}");
                    let _ = self.event_tx.send(ClientEvent::CallFailed(err));
                }
            }

            SignalMessage::Candidate { candidate, .. } => {
                self.engine.apply_candidate(candidate).await;
            }

            SignalMessage::Participants {
                participants,
                room_info,
            } => {
                self.session.apply_roster(participants.clone(), room_info);
                let _ = self
                    .event_tx
                    .send(ClientEvent::RosterUpdated { participants });
            }

            SignalMessage::Error { message } => {
                let _ = self.event_tx.send(ClientEvent::ServerError(message));
            }

            other @ (SignalMessage::Join { .. } | SignalMessage::Offer { .. }) => {
                warn!("Dropping server-bound envelope arriving inbound: {other:?}");
            }
        }
    }

    async fn handle_transport_event(&mut self, event: TransportEvent) {
        match event {
            TransportEvent::CandidateGenerated(candidate) => {
                if let Err(err) = self.engine.forward_local_candidate(candidate).await {
                    warn!("Failed to send ICE candidate: {err}");
                }
            }

            TransportEvent::RemoteTrack(track) => {
                let _ = self.event_tx.send(ClientEvent::RemoteTrack(track));
            }

            TransportEvent::Disconnected => {
                info!("Peer connection ended");
                self.engine.hangup().await;
                let _ = self.event_tx.send(ClientEvent::CallEnded);
            }
        }
    }

    async fn teardown(&mut self) {
        self.engine.hangup().await;
        self.session.leave();
    }
}
