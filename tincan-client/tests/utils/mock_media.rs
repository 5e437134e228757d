use async_trait::async_trait;
use std::sync::Arc;
use tincan_client::{MediaError, MediaSource};
use webrtc::api::media_engine::MIME_TYPE_OPUS;
use webrtc::rtp_transceiver::rtp_codec::RTCRtpCodecCapability;
use webrtc::track::track_local::track_local_static_sample::TrackLocalStaticSample;

/// Media collaborator test double: grants a silent Opus track or denies
/// capture the way a user rejecting the microphone prompt would.
pub struct MockMediaSource {
    deny: bool,
}

impl MockMediaSource {
    pub fn granting() -> Arc<Self> {
        Arc::new(Self { deny: false })
    }

    pub fn denying() -> Arc<Self> {
        Arc::new(Self { deny: true })
    }
}

#[async_trait]
impl MediaSource for MockMediaSource {
    async fn acquire_audio(&self) -> Result<Vec<Arc<TrackLocalStaticSample>>, MediaError> {
        if self.deny {
            return Err(MediaError::PermissionDenied);
        }

        Ok(vec![Arc::new(TrackLocalStaticSample::new(
            RTCRtpCodecCapability {
                mime_type: MIME_TYPE_OPUS.to_owned(),
                ..Default::default()
            },
            "audio".to_owned(),
            "tincan-test".to_owned(),
        ))])
    }
}
