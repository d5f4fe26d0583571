pub mod client;

pub use client::{Planner, PlanningService};
