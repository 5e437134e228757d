use crate::error::ClientError;
use std::fmt::Display;
use std::sync::Arc;
use tincan_core::ClientId;
use webrtc::track::track_remote::TrackRemote;

/// Observable outcomes of the dispatch loop, surfaced to the embedding
/// caller. Every asynchronous step ends in one of these or in a logged
/// diagnostic; nothing is silently swallowed.
pub enum ClientEvent {
    /// The server reported a new authoritative roster.
    RosterUpdated { participants: Vec<ClientId> },

    /// The remote peer's audio track is ready for playback.
    RemoteTrack(Arc<TrackRemote>),

    /// The current call attempt ended fatally. Room membership survives.
    CallFailed(ClientError),

    /// The call was torn down (hangup, leave or peer disconnect).
    CallEnded,

    /// An `error` envelope from the server, verbatim. No state was changed.
    ServerError(String),

    /// The signaling channel is gone; a fresh client must be connected.
    ChannelClosed(Option<String>),
}

impl Display for ClientEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ClientEvent::RosterUpdated { participants } => {
                write!(f, "RosterUpdated({} participants)", participants.len())
            }
            ClientEvent::RemoteTrack(track) => write!(f, "RemoteTrack({})", track.id()),
            ClientEvent::CallFailed(err) => write!(f, "CallFailed({err})"),
            ClientEvent::CallEnded => f.write_str("CallEnded"),
            ClientEvent::ServerError(message) => write!(f, "ServerError({message})"),
            ClientEvent::ChannelClosed(reason) => write!(f, "ChannelClosed({reason:?})"),
        }
    }
}
