/// Payload sent when the planner asks for a notification without text.
pub const DEFAULT_MESSAGE: &str = "User-requested message";

const CAPTURE_TOKEN: &str = "capture_desktop";
const SEND_TOKEN: &str = "send_message";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    CaptureRequested,
    SendMessageRequested,
    Unknown,
}

/// Background work routed through the mailbox. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    kind: EventKind,
    payload: String,
}

impl Event {
    pub fn capture() -> Self {
        Self { kind: EventKind::CaptureRequested, payload: String::new() }
    }

    pub fn send_message(payload: impl Into<String>) -> Self {
        Self { kind: EventKind::SendMessageRequested, payload: payload.into() }
    }

    pub fn unknown(payload: impl Into<String>) -> Self {
        Self { kind: EventKind::Unknown, payload: payload.into() }
    }

    pub fn kind(&self) -> EventKind {
        self.kind
    }

    pub fn payload(&self) -> &str {
        &self.payload
    }

    /// Classify a raw planner response into the follow-up event to publish.
    ///
    /// The first line starting with a command token wins; `send_message`
    /// carries the rest of its line (after an optional `:`) as payload.
    pub fn from_planner_response(raw: &str) -> Self {
        for line in raw.lines().map(str::trim) {
            if line.starts_with(CAPTURE_TOKEN) {
                return Event::capture();
            }
            if let Some(rest) = line.strip_prefix(SEND_TOKEN) {
                let text = rest.trim_start_matches(':').trim();
                return if text.is_empty() {
                    Event::send_message(DEFAULT_MESSAGE)
                } else {
                    Event::send_message(text)
                };
            }
        }
        Event::unknown(String::new())
    }
}

/// `raw` without the lines that carry a command token, so text after a
/// token (which may contain brackets) is never mistaken for part of a plan.
pub fn strip_command_lines(raw: &str) -> String {
    raw.lines()
        .filter(|line| {
            let line = line.trim();
            !line.starts_with(CAPTURE_TOKEN) && !line.starts_with(SEND_TOKEN)
        })
        .collect::<Vec<_>>()
        .join("\n")
}
