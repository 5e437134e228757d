//! Signaling client for the tincan relay: one room membership, one peer
//! connection, one event loop driving the offer/answer/ICE exchange.

pub mod client;
pub mod engine;
pub mod error;
pub mod media;
pub mod session;
pub mod signaling;
pub mod transport;

pub use client::{ClientCommand, ClientEvent, ClientHandle, VoiceClient};
pub use engine::{CallEngine, CallState};
pub use error::ClientError;
pub use media::{MediaError, MediaSource, SilentAudioSource};
pub use session::RoomSession;
pub use signaling::{ChannelEvent, SignalChannel, SignalingOutput};
pub use transport::{ConnectionWrapper, TransportConfig, TransportEvent};
