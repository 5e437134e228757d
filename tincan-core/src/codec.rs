//! Framing for the signaling envelope.
//!
//! Shape validation only: an unrecognized tag or a missing tag-specific
//! field fails here, semantically invalid payloads (a bogus SDP, a candidate
//! for a dead connection) are left to the consuming component.

use crate::model::SignalMessage;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CodecError {
    #[error("malformed signaling envelope: {0}")]
    MalformedEnvelope(#[from] serde_json::Error),
}

/// Deterministic serialization of an envelope into one JSON text frame.
pub fn encode(message: &SignalMessage) -> Result<String, CodecError> {
    Ok(serde_json::to_string(message)?)
}

/// Parses one raw frame back into an envelope.
pub fn decode(raw: &str) -> Result<SignalMessage, CodecError> {
    Ok(serde_json::from_str(raw)?)
}
