use crate::model::client::ClientId;
use crate::model::room::{RoomId, RoomMeta};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct IceServerConfig {
    pub urls: Vec<String>,
    pub username: Option<String>,
    pub credential: Option<String>,
}

/// One network path proposed by a peer, trickled out-of-band.
///
/// Field names follow the browser's `RTCIceCandidate` shape so either end of
/// the relay can speak to a web client unchanged.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct IceCandidate {
    pub candidate: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sdp_mid: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sdp_m_line_index: Option<u16>,
}

/// The signaling envelope. One JSON object per frame, discriminated by
/// `type`; each variant carries only the fields relevant to its tag.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum SignalMessage {
    #[serde(rename_all = "camelCase")]
    Join {
        room_id: RoomId,
        client_id: ClientId,
    },
    #[serde(rename_all = "camelCase")]
    Offer {
        sdp: String,
        room_id: RoomId,
        client_id: ClientId,
    },
    Answer {
        sdp: String,
    },
    #[serde(rename_all = "camelCase")]
    Candidate {
        candidate: IceCandidate,
        room_id: RoomId,
        client_id: ClientId,
    },
    #[serde(rename_all = "camelCase")]
    Participants {
        participants: Vec<ClientId>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        room_info: Option<RoomMeta>,
    },
    Error {
        message: String,
    },
}
