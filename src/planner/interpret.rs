use tracing::debug;

use super::types::{Action, ActionPlan};
use crate::error::InterpretError;

/// Extract the action plan embedded in free-form planner output.
///
/// The plan is the span from the first `[` to the last `]`, which may cross
/// lines and be wrapped in prose. Field values are not range-checked here.
pub fn interpret(raw: &str) -> Result<ActionPlan, InterpretError> {
    let fragment = locate_array(raw).ok_or(InterpretError::NoPlanFound)?;
    debug!("Plan fragment: {}", fragment);

    let actions: Vec<Action> =
        serde_json::from_str(fragment).map_err(|source| InterpretError::MalformedPlan {
            fragment: fragment.to_string(),
            source,
        })?;

    Ok(ActionPlan::new(actions))
}

fn locate_array(raw: &str) -> Option<&str> {
    let start = raw.find('[')?;
    let end = raw.rfind(']')?;
    (end > start).then(|| &raw[start..=end])
}
