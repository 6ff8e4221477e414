#[derive(Debug, thiserror::Error)]
pub enum EpicError {
    #[error("Model error: {0}")]
    Model(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, EpicError>;

impl EpicError {
    /// Whether this looks like a transient provider condition (quota,
    /// availability, timeouts) rather than a bad request. Used to annotate
    /// retry logs; the workflow's retry budget is attempt-counted and does
    /// not branch on this.
    pub fn is_transient(&self) -> bool {
        match self {
            EpicError::Model(message) => is_transient_message(message),
            _ => false,
        }
    }
}

fn is_transient_message(message: &str) -> bool {
    let normalized = message.to_ascii_uppercase();
    normalized.contains("408")
        || normalized.contains("429")
        || normalized.contains("500")
        || normalized.contains("502")
        || normalized.contains("503")
        || normalized.contains("504")
        || normalized.contains("RATE LIMIT")
        || normalized.contains("TOO MANY REQUESTS")
        || normalized.contains("RESOURCE_EXHAUSTED")
        || normalized.contains("UNAVAILABLE")
        || normalized.contains("TIMEOUT")
        || normalized.contains("TIMED OUT")
}
