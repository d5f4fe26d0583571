pub mod config;
pub mod error;
pub mod kernel;
pub mod planner;
pub mod services;
pub mod vision;

// Re-export specific items if needed for convenient access
pub use kernel::reactor::Reactor;
pub use kernel::consumer::BackgroundConsumer;
