use std::path::PathBuf;
use std::sync::Arc;

use tokio::sync::watch;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use super::bus::Mailbox;
use super::event::{Event, EventKind};
use crate::services::transport::RemoteTransport;
use crate::vision::{capture_off_thread, save_png, ScreenSource};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsumerState {
    Waiting,
    Handling,
    Stopped,
}

/// Result of handling a single event. Failures are already logged.
#[derive(Debug, PartialEq, Eq)]
pub enum HandleOutcome {
    Captured(PathBuf),
    Replied(Vec<u8>),
    Failed,
    Ignored,
}

/// Long-lived task draining the mailbox. Owns the remote transport.
pub struct BackgroundConsumer<T> {
    mailbox: Mailbox,
    screen: Arc<dyn ScreenSource>,
    capture_dir: PathBuf,
    transport: T,
    cancel: CancellationToken,
    state: watch::Sender<ConsumerState>,
}

impl<T: RemoteTransport> BackgroundConsumer<T> {
    pub fn new(
        mailbox: Mailbox,
        screen: Arc<dyn ScreenSource>,
        capture_dir: PathBuf,
        transport: T,
        cancel: CancellationToken,
    ) -> Self {
        Self {
            mailbox,
            screen,
            capture_dir,
            transport,
            cancel,
            state: watch::Sender::new(ConsumerState::Waiting),
        }
    }

    /// Follow state transitions, including those made inside `run`.
    pub fn subscribe(&self) -> watch::Receiver<ConsumerState> {
        self.state.subscribe()
    }

    fn transition(&self, next: ConsumerState) {
        let prev = self.state.send_replace(next);
        if prev != next {
            debug!("Consumer {:?} -> {:?}", prev, next);
        }
    }

    /// Drain events until cancelled, then hand the transport back for closing.
    /// Events still queued at cancellation are discarded.
    pub async fn run(mut self) -> T {
        info!("Background consumer started");
        loop {
            self.transition(ConsumerState::Waiting);
            let Some(event) = self.mailbox.next(&self.cancel).await else {
                break;
            };
            self.transition(ConsumerState::Handling);
            let outcome = self.handle(event).await;
            debug!("Event handled: {:?}", outcome);
        }
        self.transition(ConsumerState::Stopped);
        info!("Context cancelled, background consumer exiting");
        self.transport
    }

    pub async fn handle(&mut self, event: Event) -> HandleOutcome {
        match event.kind() {
            EventKind::CaptureRequested => self.capture().await,
            EventKind::SendMessageRequested => self.send(event.payload()).await,
            EventKind::Unknown => {
                debug!("Ignoring unknown event (payload: {:?})", event.payload());
                HandleOutcome::Ignored
            }
        }
    }

    async fn capture(&mut self) -> HandleOutcome {
        let frame = match capture_off_thread(self.screen.clone()).await {
            Ok(frame) => frame,
            Err(e) => {
                warn!("Error capturing desktop: {}", e);
                return HandleOutcome::Failed;
            }
        };
        match save_png(&frame, &self.capture_dir) {
            Ok(path) => HandleOutcome::Captured(path),
            Err(e) => {
                warn!("Error saving image: {}", e);
                HandleOutcome::Failed
            }
        }
    }

    /// One write, then exactly one read. No reconnection on failure.
    async fn send(&mut self, payload: &str) -> HandleOutcome {
        if let Err(e) = self.transport.send(payload).await {
            warn!("Write error: {}", e);
            return HandleOutcome::Failed;
        }

        let reply = tokio::select! {
            biased;
            _ = self.cancel.cancelled() => {
                debug!("Reply wait interrupted by cancellation");
                return HandleOutcome::Failed;
            }
            reply = self.transport.receive_one() => reply,
        };

        match reply {
            Ok(bytes) => {
                info!("Received from server: {}", String::from_utf8_lossy(&bytes));
                HandleOutcome::Replied(bytes)
            }
            Err(e) => {
                warn!("Read error: {}", e);
                HandleOutcome::Failed
            }
        }
    }
}
