mod client;
mod room;
mod signaling;

pub use client::ClientId;
pub use room::{RoomDescriptor, RoomId, RoomMeta};
pub use signaling::{IceCandidate, IceServerConfig, SignalMessage};
