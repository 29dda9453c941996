use std::fmt;

use super::{Bindings, Model, Outputs};
use crate::error::{Result, SweepError};

/// Read access to the named numeric outputs of a constructed model object
pub trait Observable {
    /// Current value of the output called `name`, if the object has one
    fn get_output(&self, name: &str) -> Option<f64>;
}

/// The conventional run step of a model object
pub trait RunStep {
    fn run(&mut self) -> Result<()>;
}

type Constructor<T> = Box<dyn Fn(&Bindings) -> Result<T> + Send + Sync>;
type Step<T> = Box<dyn Fn(&mut T) -> Result<()> + Send + Sync>;

/// A model defined as a type that is constructed from the bound parameters,
/// optionally advanced by a run step, and then read through [`Observable`].
///
/// Every invocation builds a fresh instance.
pub struct ObjectModel<T> {
    name: String,
    construct: Constructor<T>,
    run_step: Option<Step<T>>,
    outputs: Vec<String>,
}

impl<T: Observable> ObjectModel<T> {
    /// An object model without a run step: construction must set every output.
    pub fn new<C>(name: impl Into<String>, construct: C, outputs: &[&str]) -> Self
    where
        C: Fn(&Bindings) -> Result<T> + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            construct: Box::new(construct),
            run_step: None,
            outputs: outputs.iter().map(|s| s.to_string()).collect(),
        }
    }

    /// Run `step` on each instance after construction
    #[must_use]
    pub fn with_run_step<S>(mut self, step: S) -> Self
    where
        S: Fn(&mut T) -> Result<()> + Send + Sync + 'static,
    {
        self.run_step = Some(Box::new(step));
        self
    }

    #[must_use]
    pub fn without_run_step(mut self) -> Self {
        self.run_step = None;
        self
    }

    /// Names of the outputs read after the run step, in recording order
    pub fn output_names(&self) -> &[String] {
        &self.outputs
    }
}

impl<T: Observable + RunStep + 'static> ObjectModel<T> {
    /// An object model whose run step is [`RunStep::run`]
    pub fn runnable<C>(name: impl Into<String>, construct: C, outputs: &[&str]) -> Self
    where
        C: Fn(&Bindings) -> Result<T> + Send + Sync + 'static,
    {
        Self::new(name, construct, outputs).with_run_step(T::run)
    }
}

impl<T: Observable> Model for ObjectModel<T> {
    fn name(&self) -> &str {
        &self.name
    }

    fn invoke(&self, bindings: &Bindings) -> Result<Outputs> {
        let mut instance = (self.construct)(bindings)?;
        if let Some(step) = &self.run_step {
            step(&mut instance)?;
        }
        self.outputs
            .iter()
            .map(|name| {
                instance
                    .get_output(name)
                    .ok_or_else(|| SweepError::AttributeMissing(name.clone()))
            })
            .collect::<Result<Vec<_>>>()
            .map(Outputs::from)
    }

    fn default_output_names(&self) -> Option<Vec<String>> {
        Some(self.outputs.clone())
    }
}

impl<T> fmt::Debug for ObjectModel<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ObjectModel")
            .field("name", &self.name)
            .field("has_run_step", &self.run_step.is_some())
            .field("outputs", &self.outputs)
            .finish()
    }
}
