use serde::{Deserialize, Serialize};

/// One atomic instruction to the input-device layer.
///
/// Tagged by the `"action"` field of each planner record. Tags the agent does
/// not know (e.g. `scroll`) decode to `Unknown` instead of failing the plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Action {
    MouseMove { x: i32, y: i32 },
    MouseClick {},
    KeyboardType { text: String },
    KeyboardShortcut { keys: Vec<String> },
    // Kept signed so negative durations survive parsing; the dispatcher clamps.
    Wait {
        #[serde(alias = "time")]
        duration_ms: i64,
    },
    #[serde(other)]
    Unknown,
}

impl Action {
    pub fn kind(&self) -> &'static str {
        match self {
            Action::MouseMove { .. } => "mouse_move",
            Action::MouseClick {} => "mouse_click",
            Action::KeyboardType { .. } => "keyboard_type",
            Action::KeyboardShortcut { .. } => "keyboard_shortcut",
            Action::Wait { .. } => "wait",
            Action::Unknown => "unknown",
        }
    }
}

/// Ordered actions from a single planner response. Order is execution order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActionPlan {
    pub actions: Vec<Action>,
}

impl ActionPlan {
    pub fn new(actions: Vec<Action>) -> Self {
        Self { actions }
    }

    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }
}
