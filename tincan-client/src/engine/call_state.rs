/// Lifecycle of the one active call negotiation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallState {
    Idle,
    AcquiringMedia,
    Offering,
    AwaitingAnswer,
    Connected,
    Closed,
    /// Terminal. Reached from any non-terminal state on a fatal failure;
    /// the room membership is unaffected.
    Failed,
}
