use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use super::bus::EventPublisher;
use super::event::{strip_command_lines, Event, EventKind};
use super::operator::Operator;
use crate::error::{CycleError, ExecError, InterpretError};
use crate::planner::prompt::INSTRUCTION_PREAMBLE;
use crate::planner::{interpret, ActionPlan, Dispatcher};
use crate::services::input::InputDevice;
use crate::services::llm::Planner;
use crate::vision::{capture_off_thread, encode_jpeg_base64, save_png, ScreenSource};

#[derive(Debug, Clone)]
pub struct ReactorConfig {
    pub capture_dir: PathBuf,
    pub jpeg_quality: u8,
    /// Pause between reading a goal and capturing, so the operator can
    /// bring the target window forward.
    pub settle_delay: Duration,
}

impl Default for ReactorConfig {
    fn default() -> Self {
        Self {
            capture_dir: PathBuf::from("."),
            jpeg_quality: 30,
            settle_delay: Duration::from_secs(5),
        }
    }
}

/// The operator's latest stated intent. Owned by the reactor alone.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct GoalContext {
    text: String,
}

impl GoalContext {
    pub fn set(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CycleReport {
    pub actions_executed: usize,
    pub follow_up: EventKind,
}

/// Foreground driver: goal -> capture -> plan -> execute -> follow-up event.
pub struct Reactor<D, O> {
    screen: Arc<dyn ScreenSource>,
    planner: Arc<dyn Planner>,
    dispatcher: Dispatcher<D>,
    operator: O,
    publisher: EventPublisher,
    goal: GoalContext,
    config: ReactorConfig,
    cancel: CancellationToken,
}

impl<D: InputDevice, O: Operator> Reactor<D, O> {
    pub fn new(
        screen: Arc<dyn ScreenSource>,
        planner: Arc<dyn Planner>,
        device: D,
        operator: O,
        publisher: EventPublisher,
        config: ReactorConfig,
        cancel: CancellationToken,
    ) -> Self {
        Self {
            screen,
            planner,
            dispatcher: Dispatcher::new(device, cancel.clone()),
            operator,
            publisher,
            goal: GoalContext::default(),
            config,
            cancel,
        }
    }

    pub fn goal(&self) -> &GoalContext {
        &self.goal
    }

    pub fn device(&self) -> &D {
        self.dispatcher.device()
    }

    /// Loop until cancelled or the operator runs out of input.
    ///
    /// A failed cycle is logged and the loop goes back to prompting. Running
    /// out of operator input cancels the shared token so the consumer stops too.
    pub async fn run(&mut self) {
        info!("Interactive loop started");
        loop {
            let next = tokio::select! {
                biased;
                _ = self.cancel.cancelled() => break,
                goal = self.operator.next_goal() => goal,
            };
            let Some(goal) = next else {
                info!("Operator input closed, shutting down");
                self.cancel.cancel();
                break;
            };
            self.goal.set(goal);

            match self.run_cycle().await {
                Ok(report) => info!(
                    "Cycle complete: {} action(s), follow-up {:?}",
                    report.actions_executed, report.follow_up
                ),
                Err(CycleError::Cancelled) | Err(CycleError::Exec(ExecError::Cancelled { .. })) => {
                    info!("Cycle interrupted by cancellation");
                }
                Err(e) => warn!("Cycle failed, waiting for next goal: {}", e),
            }

            if self.cancel.is_cancelled() {
                break;
            }
        }
        info!("Interactive loop stopped");
    }

    /// One pass for the current goal. Any failure ends the pass early.
    pub async fn run_cycle(&mut self) -> Result<CycleReport, CycleError> {
        self.pause(self.config.settle_delay).await?;

        let frame = capture_off_thread(self.screen.clone()).await?;
        save_png(&frame, &self.config.capture_dir)?;
        let image_base64 = encode_jpeg_base64(&frame, self.config.jpeg_quality)?;

        let response = tokio::select! {
            biased;
            _ = self.cancel.cancelled() => return Err(CycleError::Cancelled),
            response = self.planner.request_plan(INSTRUCTION_PREAMBLE, self.goal.as_str(), &image_base64) => response?,
        };
        debug!("Planner response: {}", response);

        let follow_up = Event::from_planner_response(&response);
        let plan = match interpret(&strip_command_lines(&response)) {
            Ok(plan) => plan,
            // A bare command token is a valid reply without actions.
            Err(InterpretError::NoPlanFound) if follow_up.kind() != EventKind::Unknown => {
                ActionPlan::default()
            }
            Err(e) => return Err(e.into()),
        };

        self.dispatcher.execute(&plan).await?;
        info!("Response: Action taken by ai model {}", response);

        let kind = follow_up.kind();
        tokio::select! {
            biased;
            _ = self.cancel.cancelled() => return Err(CycleError::Cancelled),
            published = self.publisher.publish(follow_up) => {
                if let Err(e) = published {
                    warn!("Dropping follow-up {:?}: {}", kind, e);
                }
            }
        }

        Ok(CycleReport {
            actions_executed: plan.len(),
            follow_up: kind,
        })
    }

    async fn pause(&self, delay: Duration) -> Result<(), CycleError> {
        if delay.is_zero() {
            return Ok(());
        }
        tokio::select! {
            biased;
            _ = self.cancel.cancelled() => Err(CycleError::Cancelled),
            _ = tokio::time::sleep(delay) => Ok(()),
        }
    }
}
