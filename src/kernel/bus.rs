use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use super::event::Event;
use crate::error::BusError;

pub const MAILBOX_CAPACITY: usize = 100;

/// Single-producer, single-consumer FIFO of `Event`s.
pub fn event_bus(capacity: usize) -> (EventPublisher, Mailbox) {
    let (tx, rx) = mpsc::channel(capacity);
    (EventPublisher { tx }, Mailbox { rx })
}

#[derive(Debug)]
pub struct EventPublisher {
    tx: mpsc::Sender<Event>,
}

impl EventPublisher {
    /// Enqueue `event`, waiting for room when the mailbox is full.
    pub async fn publish(&self, event: Event) -> Result<(), BusError> {
        self.tx.send(event).await.map_err(|_| BusError::Closed)
    }
}

#[derive(Debug)]
pub struct Mailbox {
    rx: mpsc::Receiver<Event>,
}

impl Mailbox {
    /// Next event in publish order, or `None` once `cancel` fires or every
    /// publisher is gone. Cancellation wins over queued events; those are
    /// dropped with the mailbox.
    pub async fn next(&mut self, cancel: &CancellationToken) -> Option<Event> {
        tokio::select! {
            biased;
            _ = cancel.cancelled() => None,
            event = self.rx.recv() => event,
        }
    }
}
