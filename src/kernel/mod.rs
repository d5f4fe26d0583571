pub mod bus;
pub mod cancel;
pub mod consumer;
pub mod event;
pub mod operator;
pub mod reactor;

pub use bus::{event_bus, EventPublisher, Mailbox, MAILBOX_CAPACITY};
pub use consumer::{BackgroundConsumer, ConsumerState, HandleOutcome};
pub use event::{Event, EventKind};
pub use operator::{Operator, StdinOperator};
pub use reactor::{CycleReport, GoalContext, Reactor, ReactorConfig};
