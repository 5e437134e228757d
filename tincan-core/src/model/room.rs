use serde::{Deserialize, Serialize};

/// Rooms are named by the server, not derived locally.
#[derive(Debug, Serialize, Deserialize, Clone, Hash, Eq, PartialEq)]
pub struct RoomId(String);

impl<T: Into<String>> From<T> for RoomId {
    fn from(inner: T) -> Self {
        Self(inner.into())
    }
}

impl std::fmt::Display for RoomId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::ops::Deref for RoomId {
    type Target = str;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

/// Room as advertised by the room directory. Immutable once received.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RoomDescriptor {
    pub id: RoomId,
    pub display_name: String,
    pub creator_id: String,
}

/// Auxiliary room fields, passed through opaquely.
pub type RoomMeta = serde_json::Map<String, serde_json::Value>;
