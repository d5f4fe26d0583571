pub mod dispatch;
pub mod interpret;
pub mod prompt;
pub mod types;

pub use dispatch::Dispatcher;
pub use interpret::interpret;
pub use types::{Action, ActionPlan};
