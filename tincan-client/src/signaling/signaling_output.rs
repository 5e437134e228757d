use crate::error::ClientError;
use async_trait::async_trait;
use tincan_core::SignalMessage;

/// Трейт, который должна реализовать внешняя система (WebSocket канал),
/// чтобы сессия и движок могли отправлять сигналы серверу.
#[async_trait]
pub trait SignalingOutput: Send + Sync {
    /// Отправить один конверт протокола. `ChannelNotOpen`, если канал
    /// уже закрыт — сообщение при этом отбрасывается.
    async fn send(&self, message: SignalMessage) -> Result<(), ClientError>;
}
