//! Parameter sweep library
//!
//! This crate evaluates a numeric model across the cartesian product of named
//! parameter ranges and collects the results into one tensor per output.
//! It supports:
//! - Function models and stateful object models behind one [`Model`] trait
//! - Fixed parameters passed alongside the swept ones
//! - Repeated passes over the grid, averaged to smooth out stochastic models
//! - Multi-output models with a retention mask and display names
//! - Returning, displaying or persisting the finished tensors
//!
//! # Example
//!
//! ```
//! use sweepy_core::{Bindings, FunctionModel, ParameterSpec, SweepConfig, run_sweep};
//!
//! let model = FunctionModel::new("square", |p: &Bindings| Ok(p.get("x")?.powi(2)));
//! let config = SweepConfig::new(vec![ParameterSpec::new("x", 0.0, 5.0, 10)]);
//!
//! let delivery = run_sweep(&model, &config, None).unwrap();
//! let outcome = delivery.outcome().unwrap();
//! assert_eq!(outcome.tensors[0].get(&[9]), Some(25.0));
//! ```

#![warn(clippy::all)]

// ============================================================================
// Core modules
// ============================================================================

pub mod dispatch;
pub mod error;
pub mod grid;
pub mod model;
pub mod sweep;

// ============================================================================
// Test modules
// ============================================================================

#[cfg(test)]
mod tests;

// ============================================================================
// Public re-exports for convenience
// ============================================================================

pub use dispatch::{Delivery, Dispatcher, Renderer, VisualPlan, load_archive};
pub use error::{Result, SweepError};
pub use grid::{ParameterGrid, ParameterSpec, Tensor};
pub use model::{
    Bindings, FunctionModel, Model, ModelRegistry, ObjectModel, Observable, OutputSelection,
    Outputs, RunStep,
};
pub use sweep::{Destination, ResultTensor, Sweep, SweepConfig, SweepOutcome, SweepProgress};

/// Validate the destination, run the sweep on the current thread and dispatch
/// the result.
///
/// A persist location that does not exist (and may not be created) fails
/// before the model is invoked.
pub fn run_sweep<'r, M: Model + ?Sized>(
    model: &M,
    config: &SweepConfig,
    renderer: Option<&'r mut dyn Renderer>,
) -> Result<Delivery> {
    let mut dispatcher = Dispatcher::new();
    if let Some(renderer) = renderer {
        dispatcher = dispatcher.with_renderer(renderer);
    }
    dispatcher.prepare(&config.destination)?;

    let outcome = Sweep::new(config).run(model)?;
    dispatcher.deliver(outcome, &config.destination)
}
