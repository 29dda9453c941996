//! Invocation adapter.
//!
//! Function models and object models are both exposed through the [`Model`]
//! trait: one call with a [`Bindings`] table, one ordered [`Outputs`] back.
//! [`OutputSelection`] then narrows the raw outputs to the recorded ones.

mod bindings;
mod function;
mod object;
mod outputs;
mod registry;

use std::sync::Arc;

pub use bindings::{Bindings, FixedParameters};
pub use function::FunctionModel;
pub use object::{ObjectModel, Observable, RunStep};
pub use outputs::{OutputSelection, Outputs};
pub use registry::{ModelRegistry, SharedModel};

use crate::error::Result;

/// A numeric model that can be swept
pub trait Model {
    /// Name used in logs and run reports
    fn name(&self) -> &str;

    /// Evaluate the model once with the given parameters
    fn invoke(&self, bindings: &Bindings) -> Result<Outputs>;

    /// Names to use for the outputs when the sweep does not supply any
    fn default_output_names(&self) -> Option<Vec<String>> {
        None
    }
}

impl<M: Model + ?Sized> Model for &M {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn invoke(&self, bindings: &Bindings) -> Result<Outputs> {
        (**self).invoke(bindings)
    }

    fn default_output_names(&self) -> Option<Vec<String>> {
        (**self).default_output_names()
    }
}

impl<M: Model + ?Sized> Model for Box<M> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn invoke(&self, bindings: &Bindings) -> Result<Outputs> {
        (**self).invoke(bindings)
    }

    fn default_output_names(&self) -> Option<Vec<String>> {
        (**self).default_output_names()
    }
}

impl<M: Model + ?Sized> Model for Arc<M> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn invoke(&self, bindings: &Bindings) -> Result<Outputs> {
        (**self).invoke(bindings)
    }

    fn default_output_names(&self) -> Option<Vec<String>> {
        (**self).default_output_names()
    }
}
