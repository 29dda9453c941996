//! Sweep configuration and execution.

mod config;
mod engine;
mod progress;

pub use config::{Destination, SweepConfig};
pub use engine::{ResultTensor, Sweep, SweepOutcome, SweepPhase};
pub use progress::SweepProgress;
