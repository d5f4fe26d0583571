use thiserror::Error;

#[derive(Debug, Error)]
pub enum CaptureError {
    #[error("no active display found")]
    NoDisplay,
    #[error("failed to capture screenshot: {0}")]
    Platform(String),
    #[error("capture task aborted: {0}")]
    Join(String),
}

#[derive(Debug, Error)]
pub enum EncodeError {
    #[error("image encoding failed: {0}")]
    Image(#[from] image::ImageError),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Error)]
pub enum InterpretError {
    #[error("no valid JSON array found in planner response")]
    NoPlanFound,
    #[error("failed to parse plan `{fragment}`: {source}")]
    MalformedPlan {
        fragment: String,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Debug, Error)]
pub enum DeviceError {
    #[error("input device unavailable: {0}")]
    Unavailable(String),
    #[error("unsupported key `{0}`")]
    UnsupportedKey(String),
    #[error("input synthesis failed: {0}")]
    Synthesis(String),
}

#[derive(Debug, Error)]
pub enum TransportError {
    #[error("websocket error: {0}")]
    WebSocket(#[from] tokio_tungstenite::tungstenite::Error),
    #[error("connection closed by peer")]
    Disconnected,
    #[error("read timed out after {0}ms")]
    Timeout(u64),
}

#[derive(Debug, Error)]
pub enum PlanError {
    #[error("planner request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("planner server error: {0}")]
    Status(reqwest::StatusCode),
    #[error("planner returned no content")]
    Empty,
}

#[derive(Debug, Error)]
pub enum ExecError {
    /// Actions before `index` already ran and are not undone.
    #[error("action {index} failed: {source}")]
    Device {
        index: usize,
        #[source]
        source: DeviceError,
    },
    #[error("plan cancelled after {completed} action(s)")]
    Cancelled { completed: usize },
}

#[derive(Debug, Error)]
pub enum BusError {
    #[error("event bus closed")]
    Closed,
}

/// Everything that can cut one interactive cycle short.
#[derive(Debug, Error)]
pub enum CycleError {
    #[error(transparent)]
    Capture(#[from] CaptureError),
    #[error(transparent)]
    Encode(#[from] EncodeError),
    #[error(transparent)]
    Plan(#[from] PlanError),
    #[error(transparent)]
    Interpret(#[from] InterpretError),
    #[error(transparent)]
    Exec(#[from] ExecError),
    #[error("cycle cancelled")]
    Cancelled,
}
