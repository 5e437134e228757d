use std::sync::Arc;
use tincan_core::IceCandidate;
use webrtc::track::track_remote::TrackRemote;

/// События, которые транспорт генерирует для главного цикла клиента.
pub enum TransportEvent {
    /// Сгенерирован локальный ICE-кандидат, его нужно отправить серверу
    /// (через Signalling).
    CandidateGenerated(IceCandidate),

    /// Удалённая аудиодорожка готова к воспроизведению.
    RemoteTrack(Arc<TrackRemote>),

    /// Соединение с пиром разорвано.
    Disconnected,
}
