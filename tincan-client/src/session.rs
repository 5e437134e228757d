use crate::error::ClientError;
use crate::signaling::SignalingOutput;
use std::sync::Arc;
use tincan_core::{ClientId, RoomDescriptor, RoomMeta, SignalMessage};
use tracing::{debug, info};

/// Membership state for the single active room.
///
/// The server is the source of truth for the roster: the session never adds
/// or removes participants locally, it only replaces the roster wholesale
/// when the server reports one.
pub struct RoomSession {
    client_id: ClientId,
    signaling: Arc<dyn SignalingOutput>,
    current_room: Option<RoomDescriptor>,
    participants: Vec<ClientId>,
    room_meta: RoomMeta,
}

impl RoomSession {
    pub fn new(client_id: ClientId, signaling: Arc<dyn SignalingOutput>) -> Self {
        Self {
            client_id,
            signaling,
            current_room: None,
            participants: Vec::new(),
            room_meta: RoomMeta::new(),
        }
    }

    pub fn current_room(&self) -> Option<&RoomDescriptor> {
        self.current_room.as_ref()
    }

    pub fn participants(&self) -> &[ClientId] {
        &self.participants
    }

    pub fn room_meta(&self) -> &RoomMeta {
        &self.room_meta
    }

    /// Joins `room` and announces it to the server. Fire-and-forget: no
    /// optimistic roster entry is made, the server will report the roster.
    ///
    /// Errors with `RoomAlreadyJoined` while another room is active; the
    /// caller must leave first, the session never auto-leaves.
    pub async fn join(&mut self, room: RoomDescriptor) -> Result<(), ClientError> {
        if let Some(current) = &self.current_room {
            debug!("Join rejected, already in room '{}'", current.id);
            return Err(ClientError::RoomAlreadyJoined);
        }

        info!("Joining room '{}'", room.id);
        self.participants.clear();
        self.room_meta = RoomMeta::new();

        let message = SignalMessage::Join {
            room_id: room.id.clone(),
            client_id: self.client_id.clone(),
        };
        self.current_room = Some(room);
        self.signaling.send(message).await
    }

    /// Replaces the roster wholesale. Duplicate or out-of-order roster
    /// messages are idempotent by construction; a roster arriving while no
    /// room is joined is accepted and stored.
    pub fn apply_roster(&mut self, participants: Vec<ClientId>, room_meta: Option<RoomMeta>) {
        debug!("Roster update: {} participant(s)", participants.len());
        self.participants = participants;
        if let Some(meta) = room_meta {
            self.room_meta = meta;
        }
    }

    /// Leaves the current room. No-op when none is joined.
    pub fn leave(&mut self) {
        if let Some(room) = self.current_room.take() {
            info!("Left room '{}'", room.id);
        }
        self.participants.clear();
        self.room_meta = RoomMeta::new();
    }
}
