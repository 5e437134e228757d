//! Wire protocol of the tincan signaling relay: the message envelope, the
//! value types it carries and the codec that frames them.

pub mod codec;
pub mod model;

pub use codec::{CodecError, decode, encode};
pub use model::{
    ClientId, IceCandidate, IceServerConfig, RoomDescriptor, RoomId, RoomMeta, SignalMessage,
};
