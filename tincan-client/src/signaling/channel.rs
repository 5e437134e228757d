use crate::error::ClientError;
use crate::signaling::signaling_output::SignalingOutput;
use async_trait::async_trait;
use futures::{SinkExt, StreamExt};
use tincan_core::{SignalMessage, codec};
use tokio::sync::mpsc;
use tokio_tungstenite::connect_async;
use tokio_tungstenite::tungstenite::{self, Utf8Bytes};
use tracing::{error, info, warn};

/// Lifecycle events of the duplex signaling channel, in arrival order.
#[derive(Debug)]
pub enum ChannelEvent {
    /// One raw inbound frame. Parsing is the dispatcher's job.
    Message(String),
    /// The server closed the channel; carries the close reason if given.
    Closed(Option<String>),
    /// Transport-level failure. The channel is unusable afterwards.
    Error(String),
}

/// The persistent duplex channel to the relay server.
///
/// Delivery is in arrival order until the close event. Nothing survives a
/// close: there is no automatic reconnect, a fresh channel must be opened
/// by the caller.
pub struct SignalChannel {
    out_tx: mpsc::UnboundedSender<tungstenite::Message>,
}

impl SignalChannel {
    /// Establishes the channel. A resolved `Ok` is the "open" signal.
    pub async fn open(
        url: &str,
    ) -> Result<(Self, mpsc::UnboundedReceiver<ChannelEvent>), ClientError> {
        let (ws_stream, _) = connect_async(url).await.map_err(|err| {
            error!("Could not open signaling channel to {url}: {err}");
            ClientError::ChannelNotOpen
        })?;
        info!("Signaling channel open: {url}");

        let (mut sender, mut receiver) = ws_stream.split();
        let (out_tx, mut out_rx) = mpsc::unbounded_channel::<tungstenite::Message>();
        let (event_tx, event_rx) = mpsc::unbounded_channel();

        tokio::spawn(async move {
            while let Some(frame) = out_rx.recv().await {
                if sender.send(frame).await.is_err() {
                    break;
                }
            }
        });

        tokio::spawn(async move {
            while let Some(frame) = receiver.next().await {
                match frame {
                    Ok(tungstenite::Message::Text(text)) => {
                        if event_tx.send(ChannelEvent::Message(text.to_string())).is_err() {
                            break;
                        }
                    }
                    Ok(tungstenite::Message::Close(frame)) => {
                        let reason = frame.map(|f| f.reason.to_string());
                        warn!("Signaling channel closed by server: {reason:?}");
                        let _ = event_tx.send(ChannelEvent::Closed(reason));
                        break;
                    }
                    Err(err) => {
                        let _ = event_tx.send(ChannelEvent::Error(err.to_string()));
                        break;
                    }
                    _ => {}
                }
            }
        });

        Ok((Self { out_tx }, event_rx))
    }

    /// Enqueues one envelope if the channel is still open.
    pub fn send(&self, message: &SignalMessage) -> Result<(), ClientError> {
        let json = codec::encode(message)?;
        self.out_tx
            .send(tungstenite::Message::Text(Utf8Bytes::from(json)))
            .map_err(|_| ClientError::ChannelNotOpen)
    }
}

#[async_trait]
impl SignalingOutput for SignalChannel {
    async fn send(&self, message: SignalMessage) -> Result<(), ClientError> {
        SignalChannel::send(self, &message)
    }
}
