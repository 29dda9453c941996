//! Configuration types for a sweep run.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::grid::{ParameterSpec, checked_points};
use crate::model::{FixedParameters, OutputSelection};

/// Where the reduced tensors go once the sweep finishes
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Destination {
    /// Hand the tensors back to the caller, no rendering
    #[default]
    Return,
    /// Render to the screen, then hand the tensors back
    Display,
    /// Write renderings, a run report and the data archive under `location`
    Persist {
        location: PathBuf,
        /// Create `location` if it does not exist yet
        #[serde(default)]
        create_if_missing: bool,
        /// Extension used for rendered files
        #[serde(default = "default_file_type")]
        file_type: String,
    },
}

fn default_file_type() -> String {
    "txt".to_string()
}

impl Destination {
    /// Persist under `location`, which must already exist
    pub fn persist(location: impl Into<PathBuf>) -> Self {
        Destination::Persist {
            location: location.into(),
            create_if_missing: false,
            file_type: default_file_type(),
        }
    }

    /// Allow the persist location to be created. No effect on other destinations.
    #[must_use]
    pub fn create_if_missing(mut self, create: bool) -> Self {
        if let Destination::Persist {
            create_if_missing, ..
        } = &mut self
        {
            *create_if_missing = create;
        }
        self
    }

    /// Set the rendered file extension. No effect on other destinations.
    #[must_use]
    pub fn file_type(mut self, ext: impl Into<String>) -> Self {
        if let Destination::Persist { file_type, .. } = &mut self {
            *file_type = ext.into();
        }
        self
    }

    pub fn location(&self) -> Option<&PathBuf> {
        match self {
            Destination::Persist { location, .. } => Some(location),
            _ => None,
        }
    }
}

/// Everything needed to run one sweep
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SweepConfig {
    /// Swept parameters, in grid order (first varies slowest)
    pub parameters: Vec<ParameterSpec>,
    /// Constants passed to every invocation
    #[serde(default)]
    pub fixed: FixedParameters,
    /// Full passes over the grid; results are averaged across them
    #[serde(default = "default_reps")]
    pub reps: usize,
    /// Which raw outputs are recorded
    #[serde(default, rename = "record_outputs")]
    pub outputs: OutputSelection,
    /// Display names, one per recorded output
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_names: Option<Vec<String>>,
    #[serde(default)]
    pub destination: Destination,
}

fn default_reps() -> usize {
    1
}

impl SweepConfig {
    pub fn new(parameters: Vec<ParameterSpec>) -> Self {
        Self {
            parameters,
            fixed: FixedParameters::new(),
            reps: default_reps(),
            outputs: OutputSelection::Only,
            output_names: None,
            destination: Destination::Return,
        }
    }

    /// Add a constant parameter
    #[must_use]
    pub fn fixed(mut self, name: impl Into<String>, value: f64) -> Self {
        self.fixed.insert(name.into(), value);
        self
    }

    #[must_use]
    pub fn reps(mut self, reps: usize) -> Self {
        self.reps = reps;
        self
    }

    #[must_use]
    pub fn outputs(mut self, outputs: OutputSelection) -> Self {
        self.outputs = outputs;
        self
    }

    #[must_use]
    pub fn names<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.output_names = Some(names.into_iter().map(Into::into).collect());
        self
    }

    #[must_use]
    pub fn destination(mut self, destination: Destination) -> Self {
        self.destination = destination;
        self
    }

    pub fn ndim(&self) -> usize {
        self.parameters.len()
    }

    /// Number of grid points in one pass, `None` if it overflows
    pub fn total_points(&self) -> Option<usize> {
        checked_points(&self.parameters)
    }

    /// Number of model invocations across all passes, `None` if it overflows
    pub fn total_invocations(&self) -> Option<usize> {
        self.total_points()?.checked_mul(self.reps)
    }
}
