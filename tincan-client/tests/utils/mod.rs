pub mod answering_peer;
pub mod mock_media;

pub use answering_peer::*;
pub use mock_media::*;
pub use mock_signaling::*;
