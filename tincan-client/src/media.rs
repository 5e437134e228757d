use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;
use webrtc::api::media_engine::MIME_TYPE_OPUS;
use webrtc::rtp_transceiver::rtp_codec::RTCRtpCodecCapability;
use webrtc::track::track_local::track_local_static_sample::TrackLocalStaticSample;

#[derive(Debug, Error)]
pub enum MediaError {
    #[error("microphone access denied")]
    PermissionDenied,

    #[error("capture failed: {0}")]
    Capture(String),
}

/// Трейт, который должна реализовать внешняя система захвата звука,
/// чтобы движок мог прикрепить локальные дорожки перед созданием offer.
#[async_trait]
pub trait MediaSource: Send + Sync {
    async fn acquire_audio(&self) -> Result<Vec<Arc<TrackLocalStaticSample>>, MediaError>;
}

/// Registers an Opus track without feeding samples into it. Keeps an audio
/// m-line in the offer on machines without a capture device.
pub struct SilentAudioSource;

#[async_trait]
impl MediaSource for SilentAudioSource {
    async fn acquire_audio(&self) -> Result<Vec<Arc<TrackLocalStaticSample>>, MediaError> {
        let track = Arc::new(TrackLocalStaticSample::new(
            RTCRtpCodecCapability {
                mime_type: MIME_TYPE_OPUS.to_owned(),
                ..Default::default()
            },
            "audio".to_owned(),
            "tincan".to_owned(),
        ));
        Ok(vec![track])
    }
}
