//! Milestone state machine

mod machine;
mod state;

#[cfg(test)]
mod machine_tests;

pub use machine::{MilestoneEvent, process_snapshot};
pub use state::TrackingState;
