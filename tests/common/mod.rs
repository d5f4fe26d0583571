#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use image::{Rgba, RgbaImage};
use labo::error::{CaptureError, DeviceError, PlanError, TransportError};
use labo::kernel::Operator;
use labo::services::input::InputDevice;
use labo::services::llm::Planner;
use labo::services::transport::RemoteTransport;
use labo::vision::ScreenSource;

/// Records every successful device call; fails the call at `fail_at`.
#[derive(Clone, Default)]
pub struct RecordingDevice {
    pub calls: Arc<Mutex<Vec<String>>>,
    pub fail_at: Option<usize>,
    attempts: Arc<Mutex<usize>>,
}

impl RecordingDevice {
    pub fn failing_at(index: usize) -> Self {
        Self { fail_at: Some(index), ..Self::default() }
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&mut self, call: String) -> Result<(), DeviceError> {
        let mut attempts = self.attempts.lock().unwrap();
        let n = *attempts;
        *attempts += 1;
        if self.fail_at == Some(n) {
            return Err(DeviceError::Synthesis(format!("injected failure on {}", call)));
        }
        self.calls.lock().unwrap().push(call);
        Ok(())
    }
}

impl InputDevice for RecordingDevice {
    fn move_cursor(&mut self, x: i32, y: i32) -> Result<(), DeviceError> {
        self.record(format!("move {},{}", x, y))
    }

    fn click_primary(&mut self) -> Result<(), DeviceError> {
        self.record("click".to_string())
    }

    fn type_text(&mut self, text: &str) -> Result<(), DeviceError> {
        self.record(format!("type {}", text))
    }

    fn key_chord(&mut self, keys: &[String]) -> Result<(), DeviceError> {
        self.record(format!("chord {}", keys.join("+")))
    }
}

pub struct FakeScreen {
    pub width: u32,
    pub height: u32,
    pub fail: bool,
}

impl FakeScreen {
    pub fn ok() -> Self {
        Self { width: 32, height: 24, fail: false }
    }

    pub fn broken() -> Self {
        Self { width: 0, height: 0, fail: true }
    }
}

impl ScreenSource for FakeScreen {
    fn capture(&self) -> Result<RgbaImage, CaptureError> {
        if self.fail {
            return Err(CaptureError::NoDisplay);
        }
        Ok(RgbaImage::from_pixel(self.width, self.height, Rgba([10, 120, 200, 255])))
    }
}

/// Replies from a script; `None` entries fail with `PlanError::Empty`.
pub struct ScriptedPlanner {
    replies: Mutex<VecDeque<Option<String>>>,
    pub goals: Arc<Mutex<Vec<String>>>,
}

impl ScriptedPlanner {
    pub fn new(replies: Vec<Option<&str>>) -> Self {
        Self {
            replies: Mutex::new(replies.into_iter().map(|r| r.map(str::to_string)).collect()),
            goals: Arc::new(Mutex::new(Vec::new())),
        }
    }
}

#[async_trait]
impl Planner for ScriptedPlanner {
    async fn request_plan(
        &self,
        _preamble: &str,
        goal: &str,
        image_base64: &str,
    ) -> Result<String, PlanError> {
        assert!(!image_base64.is_empty(), "planner must receive the encoded frame");
        self.goals.lock().unwrap().push(goal.to_string());
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .flatten()
            .ok_or(PlanError::Empty)
    }
}

pub struct ScriptedOperator {
    goals: VecDeque<String>,
}

impl ScriptedOperator {
    pub fn new(goals: &[&str]) -> Self {
        Self { goals: goals.iter().map(|g| g.to_string()).collect() }
    }
}

#[async_trait]
impl Operator for ScriptedOperator {
    async fn next_goal(&mut self) -> Option<String> {
        self.goals.pop_front()
    }
}

/// Records sent messages; replies from a queue, then reports disconnection.
#[derive(Clone, Default)]
pub struct FakeTransport {
    pub sent: Arc<Mutex<Vec<String>>>,
    pub replies: Arc<Mutex<VecDeque<Vec<u8>>>>,
    pub echo: bool,
    pub closed: Arc<Mutex<bool>>,
}

impl FakeTransport {
    pub fn echoing() -> Self {
        Self { echo: true, ..Self::default() }
    }

    pub fn sent(&self) -> Vec<String> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl RemoteTransport for FakeTransport {
    async fn send(&mut self, text: &str) -> Result<(), TransportError> {
        self.sent.lock().unwrap().push(text.to_string());
        if self.echo {
            self.replies.lock().unwrap().push_back(format!("ack {}", text).into_bytes());
        }
        Ok(())
    }

    async fn receive_one(&mut self) -> Result<Vec<u8>, TransportError> {
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .ok_or(TransportError::Disconnected)
    }

    async fn close(&mut self) -> Result<(), TransportError> {
        *self.closed.lock().unwrap() = true;
        Ok(())
    }
}
