use model::Stage;

/// One progress update for a task.
#[derive(Debug, Clone)]
pub struct ProgressEvent {
    /// The lifecycle stage this update represents.
    pub stage: Stage,
    /// A representative percentage, `0..=100`.
    pub progress: u8,
    /// A short human-readable status message.
    pub message: String,
    /// Optional structured payload (e.g. partial results) a subscriber may want.
    pub payload: Option<serde_json::Value>,
}

impl ProgressEvent {
    /// Whether this event represents a terminal stage (`complete`, `error`, `cancelled`).
    pub fn is_terminal(&self) -> bool {
        self.stage.is_terminal()
    }
}
