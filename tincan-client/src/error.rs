use crate::media::MediaError;
use thiserror::Error;
use tincan_core::CodecError;

/// Failure taxonomy of the signaling client.
///
/// Candidate-application failures are deliberately absent: a single bad ICE
/// candidate never aborts a call, it is logged and dropped.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Transport unavailable. The outbound message was dropped; there is no
    /// automatic reconnect.
    #[error("signaling channel is not open")]
    ChannelNotOpen,

    #[error(transparent)]
    Codec(#[from] CodecError),

    /// Capture refused, typically a permission denial. Fatal to the current
    /// call attempt and not retried.
    #[error("audio capture failed")]
    MediaAcquisitionDenied(#[source] MediaError),

    /// A negotiation step was rejected. Fatal to the current call; the room
    /// membership survives and the caller may retry.
    #[error("negotiation rejected: {0}")]
    NegotiationRejected(anyhow::Error),

    /// `join` while another room is active. The core never auto-leaves.
    #[error("another room is already joined")]
    RoomAlreadyJoined,

    /// An `error` envelope relayed by the server, verbatim.
    #[error("server error: {0}")]
    Server(String),
}
