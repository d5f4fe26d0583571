use std::time::Duration;

use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use super::types::{Action, ActionPlan};
use crate::error::{DeviceError, ExecError};
use crate::services::input::InputDevice;

/// Runs action plans against an input device, strictly in order.
pub struct Dispatcher<D> {
    device: D,
    cancel: CancellationToken,
}

impl<D: InputDevice> Dispatcher<D> {
    pub fn new(device: D, cancel: CancellationToken) -> Self {
        Self { device, cancel }
    }

    pub fn device(&self) -> &D {
        &self.device
    }

    /// Execute every action of `plan` in sequence.
    ///
    /// Stops at the first device failure. Whatever already ran stays done:
    /// desktop side effects cannot be rolled back. Cancellation is observed
    /// between actions and during waits, never inside a device call.
    pub async fn execute(&mut self, plan: &ActionPlan) -> Result<(), ExecError> {
        info!("Executing plan of {} action(s)", plan.len());

        for (index, action) in plan.actions.iter().enumerate() {
            if self.cancel.is_cancelled() {
                return Err(ExecError::Cancelled { completed: index });
            }

            match self.execute_one(action).await {
                Ok(()) => {}
                Err(StepFailure::Device(source)) => {
                    warn!("Action {} ({}) failed: {}", index, action.kind(), source);
                    return Err(ExecError::Device { index, source });
                }
                Err(StepFailure::Cancelled) => {
                    return Err(ExecError::Cancelled { completed: index });
                }
            }
        }

        Ok(())
    }

    async fn execute_one(&mut self, action: &Action) -> Result<(), StepFailure> {
        match action {
            Action::MouseMove { x, y } => {
                info!("Moving mouse to ({}, {})", x, y);
                self.device.move_cursor(*x, *y)?;
            }
            Action::MouseClick {} => {
                info!("Clicking the mouse");
                self.device.click_primary()?;
            }
            Action::KeyboardType { text } => {
                info!("Typing text: {}", text);
                self.device.type_text(text)?;
            }
            Action::KeyboardShortcut { keys } => {
                if keys.is_empty() {
                    warn!("Skipping keyboard shortcut with no keys");
                    return Ok(());
                }
                info!("Executing keyboard shortcut: {}", keys.join("+"));
                self.device.key_chord(keys)?;
            }
            Action::Wait { duration_ms } => {
                let millis = clamp_wait(*duration_ms);
                info!("Waiting for {} milliseconds", millis);
                tokio::select! {
                    biased;
                    _ = self.cancel.cancelled() => return Err(StepFailure::Cancelled),
                    _ = tokio::time::sleep(Duration::from_millis(millis)) => {}
                }
            }
            Action::Unknown => {
                warn!("Unknown action from planner response, skipping");
            }
        }
        Ok(())
    }
}

enum StepFailure {
    Device(DeviceError),
    Cancelled,
}

impl From<DeviceError> for StepFailure {
    fn from(err: DeviceError) -> Self {
        StepFailure::Device(err)
    }
}

/// Negative waits are treated as zero.
pub fn clamp_wait(duration_ms: i64) -> u64 {
    if duration_ms < 0 {
        warn!("Negative wait of {}ms clamped to 0", duration_ms);
    }
    duration_ms.max(0) as u64
}
